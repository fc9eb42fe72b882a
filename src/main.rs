//! `iris-panel`: load a validation model, draw it into an in-memory report
//! and replay interaction commands read from stdin.
//!
//! ```text
//! iris-panel <model.json> [options.toml] < commands.txt
//! ```
//!
//! One command per line: `version`, `chain <c>`, `begin|move|end <r>`,
//! `segment <code> <r>` or `recalibrate`. Run with `RUST_LOG=trace` to see
//! every element write.

use std::io::BufRead;
use std::path::Path;
use std::process::ExitCode;

use iris_panel::model::ModelData;
use iris_panel::options::PanelOptions;
use iris_panel::render::recording::RecordingTarget;
use iris_panel::{IrisError, Panel, PanelCommand};

fn load(
    model_path: &str,
    options_path: Option<&str>,
) -> Result<(Panel, RecordingTarget), IrisError> {
    let data = ModelData::load(Path::new(model_path))?;
    let options = match options_path {
        Some(path) => PanelOptions::load(Path::new(path))?,
        None => PanelOptions::default(),
    };
    let mut target = RecordingTarget::with_residue_view(
        options.residue_view.boxes.len(),
        options.residue_view.bars.len(),
    );
    let panel = Panel::new(data, options, &target)?;
    panel.render(&mut target);
    Ok((panel, target))
}

fn replay(
    panel: &mut Panel,
    target: &mut RecordingTarget,
    input: impl BufRead,
) -> Result<(), IrisError> {
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let writes = target.writes();
        match line
            .parse::<PanelCommand>()
            .and_then(|command| panel.execute(command, target))
        {
            Ok(change) => {
                let s = panel.selection();
                log::info!(
                    "{}: {line} -> {change:?} (version {}, chain {}, residue {}, {} writes)",
                    number + 1,
                    s.version,
                    s.chain,
                    s.residue,
                    target.writes() - writes,
                );
            }
            Err(e) => log::warn!("{}: {line}: {e}", number + 1),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(model_path) = args.first() else {
        log::error!("Usage: iris-panel <model.json> [options.toml]");
        return ExitCode::FAILURE;
    };

    let (mut panel, mut target) =
        match load(model_path, args.get(1).map(String::as_str)) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        };
    for line in panel.layout().legend() {
        log::info!("{line}");
    }
    log::info!("initial render: {} writes", target.writes());

    let stdin = std::io::stdin();
    if let Err(e) = replay(&mut panel, &mut target, stdin.lock()) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
