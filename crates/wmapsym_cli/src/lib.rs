use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use thiserror::Error;
use tracing::{info, Level};
use wmapsym_core::prelude::*;
use wmapsym_flow::StartFlow;

mod settings;
pub use settings::*;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("{}: {error}", .path.display())]
    Io { path: PathBuf, error: io::Error },
    #[error("{0}")]
    Format(#[from] FormatError),
    #[error("{0}")]
    Rotation(#[from] RotationError),
    #[error("{0:?} is not a rotation in degrees")]
    RotationInput(String),
    #[error("{0}")]
    Symmetrize(#[from] SymmetrizeError),
    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),
}

/// Runs the flow, returns the process exit code.
pub fn cli_main(flow: StartFlow) -> i32 {
    setup_tracing();

    let settings = Settings::from_disk().unwrap_or_default();

    match flow {
        StartFlow::Interactive => {
            let stdin = io::stdin();
            match interactive(stdin.lock(), io::stdout(), &settings) {
                Ok(()) => 0,
                Err(err) => {
                    eprintln!("ERROR: {}", err);
                    1
                }
            }
        }
        StartFlow::Convert {
            settings: convert_settings,
        } => match convert(&convert_settings, &settings) {
            Ok(out_path) => {
                println!("Successfully completed");
                println!("Output file path: {}", out_path.display());
                0
            }
            Err(err) => {
                eprintln!("ERROR: {}", err);
                1
            }
        },
    }
}

/// Prompts for maps until the input ends or an empty path is given.
/// A failed conversion is reported and the prompt starts over.
pub fn interactive(
    mut input: impl BufRead,
    mut output: impl Write,
    settings: &Settings,
) -> io::Result<()> {
    loop {
        write!(output, "\nEnter map file path: ")?;
        output.flush()?;
        let Some(path) = read_answer(&mut input)? else {
            return Ok(());
        };
        if path.is_empty() {
            return Ok(());
        }

        write!(output, "rotation: ")?;
        output.flush()?;
        let rotation = read_answer(&mut input)?.unwrap_or_default();

        let result = parse_rotation(&rotation, settings).and_then(|rotation| {
            let job = ConvertSettings::default()
                .with_path(path)
                .with_rotation(rotation);
            convert(&job, settings)
        });
        match result {
            Ok(out_path) => {
                writeln!(output, "Successfully completed")?;
                writeln!(output, "Output file path: {}", out_path.display())?;
            }
            Err(err) => {
                info!(target: "cli", "conversion failed: {}", err);
                writeln!(output, "ERROR: {}", err)?;
            }
        }
    }
}

/// Trimmed line, None at the end of the input.
fn read_answer(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_rotation(answer: &str, settings: &Settings) -> Result<i32, RunError> {
    if answer.is_empty() {
        return Ok(settings.default_rotation);
    }
    answer
        .parse()
        .map_err(|_| RunError::RotationInput(answer.to_string()))
}

/// Reads, symmetrizes and writes one map, returns where it was written.
pub fn convert(job: &ConvertSettings, settings: &Settings) -> Result<PathBuf, RunError> {
    let in_path = PathBuf::from(&job.path);
    let turns = job.turns()?;
    let out_path = match &job.output {
        Some(output) => PathBuf::from(output),
        None => output_path(&in_path, &settings.output_prefix)?,
    };

    let text = fs::read_to_string(&in_path).map_err(|error| RunError::Io {
        path: in_path.clone(),
        error,
    })?;
    let map = Map::parse(&text)?.with_origin(in_path.clone());
    info!(target: "cli", "read {:?}, {} map, starts {:?}", in_path, map.grid.size, map.starts());

    let symmetrized = symmetrize_map(&map, turns)?;
    tracing::debug!(
        target: "cli",
        "symmetric: {}, starts {:?}",
        is_symmetric(&symmetrized.grid),
        symmetrized.starts()
    );

    fs::write(&out_path, symmetrized.to_string()).map_err(|error| RunError::Io {
        path: out_path.clone(),
        error,
    })?;
    info!(target: "cli", "wrote {:?}", out_path);
    Ok(out_path)
}

/// Input path with `prefix` added to the file name.
pub fn output_path(input: &Path, prefix: &str) -> Result<PathBuf, RunError> {
    let Some(name) = input.file_name() else {
        return Err(RunError::NoFileName(input.to_path_buf()));
    };
    Ok(input.with_file_name(format!("{}{}", prefix, name.to_string_lossy())))
}

fn get_data_dir() -> Option<PathBuf> {
    let mut path = dirs::data_dir()?;
    path.push("wmapsym/");
    let _ = std::fs::create_dir_all(path.clone());
    Some(path)
}

fn get_data_dir_sub(sub: &str) -> Option<PathBuf> {
    let mut path = get_data_dir()?;
    path.push(format!("{}/", sub));
    let _ = std::fs::create_dir_all(path.clone());
    Some(path)
}

fn setup_tracing() {
    let Some(mut path) = get_data_dir_sub("traces") else {
        return;
    };

    let epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    path.push(format!("trace_{}.txt", epoch));

    let Ok(log_file) = std::fs::File::create(path.clone()) else {
        eprintln!("Can't create trace file at {:?}", path);
        return;
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_writer(log_file)
        .with_max_level(Level::TRACE)
        .with_line_number(true)
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber)
        .map_err(|_err| eprintln!("Unable to set global default subscriber"));
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const SAMPLE: &str = "Aa,1 Bb,Xx,Xx\nCc,Dd,Xx,Xx\nXx,Xx,Xx,Xx\nXx,Xx,Xx,Xx\n";
    const SAMPLE_HALF_TURN: &str =
        "Dd,Cc,2 Bb,Dd\n1 Bb,Aa,Aa,Cc\nCc,Aa,Aa,3 Bb\nDd,4 Bb,Cc,Dd\n";

    fn session(answers: &str, settings: &Settings) -> String {
        let mut out = Vec::new();
        interactive(Cursor::new(answers.to_string()), &mut out, settings).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prefixed_output_path() {
        let out = output_path(Path::new("maps/2p_Caves.map"), "sym_").unwrap();
        assert_eq!(out, PathBuf::from("maps/sym_2p_Caves.map"));
        assert!(matches!(
            output_path(Path::new(".."), "sym_"),
            Err(RunError::NoFileName(_))
        ));
    }

    #[test]
    fn convert_writes_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("duel.map");
        fs::write(&input, "1 Gg,Ww\nHh,Mm\n").unwrap();

        let job = ConvertSettings::default().with_path(input.to_string_lossy().to_string());
        let out = convert(&job, &Settings::default()).unwrap();

        assert_eq!(out, dir.path().join("sym_duel.map"));
        assert_eq!(fs::read_to_string(out).unwrap(), "1 Gg,2 Gg\n4 Gg,3 Gg\n");
    }

    #[test]
    fn convert_explicit_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("duel.map");
        let output = dir.path().join("quad.map");
        fs::write(&input, SAMPLE).unwrap();

        let job = ConvertSettings {
            path: input.to_string_lossy().to_string(),
            rotation: 180,
            output: Some(output.to_string_lossy().to_string()),
        };
        convert(&job, &Settings::default()).unwrap();
        assert_eq!(fs::read_to_string(output).unwrap(), SAMPLE_HALF_TURN);
    }

    #[test]
    fn convert_errors_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.map");
        fs::write(&input, "Gg,Ww\nHh\n").unwrap();

        let job = ConvertSettings::default().with_path(input.to_string_lossy().to_string());
        assert!(matches!(
            convert(&job, &Settings::default()),
            Err(RunError::Format(FormatError::RaggedRow { .. }))
        ));
        assert!(!dir.path().join("sym_bad.map").exists());

        let job = job.with_rotation(45);
        assert!(matches!(
            convert(&job, &Settings::default()),
            Err(RunError::Rotation(_))
        ));

        let job = ConvertSettings::default().with_path(
            dir.path().join("missing.map").to_string_lossy().to_string(),
        );
        assert!(matches!(
            convert(&job, &Settings::default()),
            Err(RunError::Io { .. })
        ));
    }

    #[test]
    fn interactive_retries_after_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("duel.map");
        fs::write(&input, "1 Gg,Ww\nHh,Mm\n").unwrap();
        let path = input.to_string_lossy();

        let answers = format!("{path}\nninety\n{path}\n\n");
        let out = session(&answers, &Settings::default());

        assert!(out.contains("ERROR: \"ninety\" is not a rotation in degrees"));
        assert!(out.contains("Successfully completed"));
        assert_eq!(out.matches("Enter map file path: ").count(), 3);
        assert!(dir.path().join("sym_duel.map").exists());
    }

    #[test]
    fn interactive_uses_settings() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("duel.map");
        fs::write(&input, SAMPLE).unwrap();
        let settings = Settings {
            output_prefix: "4p_".to_string(),
            default_rotation: 180,
        };

        let out = session(&format!("{}\n\n", input.to_string_lossy()), &settings);
        assert!(out.contains("Successfully completed"), "{}", out);
        let written = fs::read_to_string(dir.path().join("4p_duel.map")).unwrap();
        assert_eq!(written, SAMPLE_HALF_TURN);
    }

    #[test]
    fn empty_path_ends_session() {
        let out = session("\n", &Settings::default());
        assert_eq!(out, "\nEnter map file path: ");
    }
}
