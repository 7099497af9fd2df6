use anyhow::Context;
use clap::Parser;
use log::info;
use gazecore::overlay::SolidFrameSource;
use generator::profile::{build_object_centers, build_trial_payload_from_config, GeneratorConfig};
use gazecore::trial_interface::TrialAncillary;
use report::{RunReport, TrialReport};
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::task::JoinSet;
use workflow::config::WorkflowConfig;
use workflow::runner::{Runner, TrialResult};

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the gaze fixation pipeline")]
struct Args {
    /// Run synthetic trials offline and emit a report
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 0.01)]
    t1: f64,
    #[arg(long, default_value_t = 0.01)]
    t2: f64,
    #[arg(long, default_value_t = 0.001)]
    min_dur: f64,
    #[arg(long, default_value_t = 24.0)]
    frame_rate: f64,
    /// Number of synthetic trials to process
    #[arg(long, default_value_t = 4)]
    trials: usize,
    /// Base seed for the trial generator
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Where the JSON report is written
    #[arg(long, default_value = "tools/data/offline_report.json")]
    report: PathBuf,
    /// Render the first trial's annotated video to this path
    #[arg(long)]
    video_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.t1, args.t2, args.min_dur, args.frame_rate)
    };

    let runner = Runner::new(workflow_config.clone());

    if args.offline {
        let runtime = TokioBuilder::new_multi_thread()
            .enable_all()
            .build()
            .context("creating trial runtime")?;
        let mut outcomes =
            runtime.block_on(run_trials(runner.clone(), args.trials, args.seed))?;
        // Trials finish in arbitrary order; the report is sorted by trial index.
        outcomes.sort_by_key(|(index, _, _)| *index);

        let (processed, failed) = runner.metrics_snapshot();
        let total_fixations: usize = outcomes
            .iter()
            .map(|(_, _, result)| result.fixations.len())
            .sum();
        println!(
            "Offline run -> trials {}, failed {}, fixations {}",
            processed, failed, total_fixations
        );

        if let Some(video_path) = args.video_out {
            if let Some((_, _, first)) = outcomes.first() {
                let mut source = SolidFrameSource::new(640, 480, args.frame_rate, [0, 0, 0], 150);
                let written = runner
                    .render_overlay(&mut source, &first.fixations, &video_path)
                    .context("rendering offline overlay artifact")?;
                println!("Overlay artifact -> {} frames at {}", written, video_path.display());
            }
        }

        let run_report = RunReport {
            trials: outcomes
                .into_iter()
                .map(|(_, ancillary, result)| TrialReport {
                    video: ancillary.video,
                    participant: ancillary.participant,
                    session: ancillary.session,
                    fixations: result.fixations.fixations().to_vec(),
                    distances: result.distances.fill_default(),
                    discarded_clusters: result.discarded_clusters,
                    notes: result.notes,
                })
                .collect(),
            trials_processed: processed,
            trials_failed: failed,
        };
        run_report.write(&args.report)?;
        info!(
            "offline report written to {} ({} trials, {} failed)",
            args.report.display(),
            processed,
            failed
        );
    }

    Ok(())
}

/// Runs the requested number of generated trials concurrently. Trials share
/// no state, so each gets its own blocking worker.
async fn run_trials(
    runner: Runner,
    trials: usize,
    base_seed: u64,
) -> anyhow::Result<Vec<(usize, TrialAncillary, TrialResult)>> {
    let mut set = JoinSet::new();
    for index in 0..trials {
        let runner = runner.clone();
        set.spawn_blocking(move || {
            let config = GeneratorConfig {
                seed: base_seed + index as u64,
                participant: 1 + index as u32,
                ..Default::default()
            };
            let payload = build_trial_payload_from_config(&config)?;
            let centers = build_object_centers(&config);
            let result = runner.execute(&payload, &centers)?;
            Ok::<_, anyhow::Error>((index, payload.ancillary, result))
        });
    }

    let mut outcomes = Vec::with_capacity(trials);
    while let Some(joined) = set.join_next().await {
        outcomes.push(joined.context("joining trial worker")??);
    }
    Ok(outcomes)
}
