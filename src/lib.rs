// src/lib.rs

pub mod answer;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod response;
pub mod session;
pub mod submit;
pub mod widget;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, info};

use crate::answer::AnswerRecord;
use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::{ScenarioFile, StepAction};
use crate::session::{Session, SessionEvent};
use crate::submit::ChannelSink;
use crate::widget::{spawn_forwarder, CodeWidget, ScriptedWidget, WidgetEvent};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - scenario loading
/// - the replay itself
/// - check evaluation over the submitted records
pub async fn run(args: CliArgs) -> Result<()> {
    let scenario_path = PathBuf::from(&args.scenario);
    let scenario = load_and_validate(&scenario_path)?;

    if args.dry_run {
        print_dry_run(&scenario);
        return Ok(());
    }

    let records = replay(scenario.clone()).await?;

    evaluate_checks(&scenario, &records)
}

/// Replay a scenario against a fresh session wired to a scripted widget.
///
/// Each submitted record is printed to stdout as JSON; the full list is
/// returned so callers can evaluate it further.
pub async fn replay(scenario: ScenarioFile) -> Result<Vec<AnswerRecord>> {
    // Scripted widget standing in for the real embed.
    let widget = ScriptedWidget::default();
    widget.begin_load(&scenario.session.initial_code);

    // Raw widget event channel, fed by the replayer.
    let (widget_tx, widget_rx) = mpsc::channel::<WidgetEvent>(64);

    // Session event channel; the forwarder and the timers both feed it.
    let (session_tx, session_rx) = mpsc::channel::<SessionEvent>(64);

    let _forwarder_handle =
        spawn_forwarder(widget.clone(), widget_rx, session_tx.clone());

    // Submitted records flow back over this channel.
    let (record_tx, record_rx) = mpsc::channel::<AnswerRecord>(16);
    let sink = ChannelSink::new(record_tx);

    // Ctrl-C → graceful shutdown.
    {
        let tx = session_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(SessionEvent::Shutdown).await;
        });
    }

    // Print records as they are submitted and keep them for the caller.
    let collector = spawn_record_collector(record_rx);

    // Replay the scenario steps on their schedule, then request shutdown.
    let _replayer_handle = spawn_replayer(
        scenario.clone(),
        widget.clone(),
        widget_tx,
        session_tx.clone(),
    );

    let options = scenario.session_options();
    let session = Session::new(options, widget, sink, session_rx, session_tx);
    session.run().await?;

    // The session owned the only record sender, so the collector drains and
    // finishes once it has exited.
    let records = collector.await?;

    Ok(records)
}

/// Print each submitted record to stdout as JSON and collect them all.
fn spawn_record_collector(
    mut record_rx: mpsc::Receiver<AnswerRecord>,
) -> JoinHandle<Vec<AnswerRecord>> {
    tokio::spawn(async move {
        let mut records = Vec::new();
        while let Some(record) = record_rx.recv().await {
            match serde_json::to_string(&record) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("failed to serialize record: {err}"),
            }
            records.push(record);
        }
        records
    })
}

/// Feed the scenario's steps to the widget on their schedule.
///
/// The widget load fires immediately; each step waits for its `at_ms` mark.
/// After the last step the replay sleeps out the settle time so pending
/// timers can fire, then requests shutdown.
fn spawn_replayer(
    scenario: ScenarioFile,
    widget: ScriptedWidget,
    widget_tx: mpsc::Sender<WidgetEvent>,
    session_tx: mpsc::Sender<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = Instant::now();

        if widget_tx.send(WidgetEvent::Load).await.is_err() {
            return;
        }

        for step in &scenario.step {
            sleep_until(start + Duration::from_millis(step.at_ms)).await;

            let sent = match &step.action {
                StepAction::Start => {
                    widget_tx.send(WidgetEvent::StartExecute).await.is_ok()
                }
                StepAction::Finish { output } => {
                    widget.stage_output(output.clone());
                    widget_tx.send(WidgetEvent::Execute).await.is_ok()
                }
                StepAction::Fail { message } => widget_tx
                    .send(WidgetEvent::Error {
                        message: message.clone(),
                    })
                    .await
                    .is_ok(),
                StepAction::Edit { code } => {
                    widget.set_code(code);
                    true
                }
                StepAction::Reset => session_tx
                    .send(SessionEvent::ResetRequested)
                    .await
                    .is_ok(),
            };

            if !sent {
                debug!("session stopped listening; abandoning replay");
                return;
            }
        }

        sleep(scenario.settle_time()).await;
        let _ = session_tx.send(SessionEvent::Shutdown).await;
    })
}

/// Evaluate the scenario's checks against the last submitted record.
fn evaluate_checks(scenario: &ScenarioFile, records: &[AnswerRecord]) -> Result<()> {
    if scenario.check.is_empty() {
        return Ok(());
    }

    let Some(last) = records.last() else {
        anyhow::bail!(
            "scenario has {} check(s) but no record was submitted",
            scenario.check.len()
        );
    };

    let mut failures = 0usize;
    for check in &scenario.check {
        if check.matches(last) {
            println!("[runpad] Check passed: {}", check.description());
        } else {
            println!("[runpad] Check failed: {}", check.description());
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} check(s) failed", scenario.check.len());
    }

    info!(checks = scenario.check.len(), "all checks passed");
    Ok(())
}

/// Simple dry-run output: print session options, steps and checks.
fn print_dry_run(scenario: &ScenarioFile) {
    println!("runpad dry-run");
    println!("  session.initial_code = {:?}", scenario.session.initial_code);
    println!("  session.fallback_ms = {}", scenario.session.fallback_ms);
    println!("  session.suppression_ms = {}", scenario.session.suppression_ms);
    if let Some(settle) = scenario.session.settle_ms {
        println!("  session.settle_ms = {settle}");
    }
    println!();

    println!("steps ({}):", scenario.step.len());
    for step in &scenario.step {
        match &step.action {
            StepAction::Start => println!("  - at {}ms: start", step.at_ms),
            StepAction::Finish { output } => {
                println!("  - at {}ms: finish output={output:?}", step.at_ms)
            }
            StepAction::Fail { message } => {
                println!("  - at {}ms: fail message={message:?}", step.at_ms)
            }
            StepAction::Edit { code } => {
                println!("  - at {}ms: edit code={code:?}", step.at_ms)
            }
            StepAction::Reset => println!("  - at {}ms: reset", step.at_ms),
        }
    }

    if !scenario.check.is_empty() {
        println!();
        println!("checks ({}):", scenario.check.len());
        for check in &scenario.check {
            println!("  - {}", check.description());
        }
    }

    debug!("dry-run complete (no replay)");
}
