mod config;
mod logging;
mod ui;

use std::process::ExitCode;

use config::AppConfig;
use filter_studio_adapters::{
    present_gallery_row, present_parameter_row, present_preset_row, BackgroundDecodeQueue,
    CpuFilterRenderer, FsExportSink, ImageCrateDecoder, PngImageEncoder, SqliteGalleryStore,
    SystemClock,
};
use filter_studio_application::{
    ApplyPresetCommand, BootstrapGalleryCommand, DownloadCommand, EditingSession, EditorService,
    ListGalleryQuery, LoadImageCommand, SaveCommand, SessionEvent, SessionEventKind,
    SetParameterCommand,
};
use filter_studio_domain::{FilterState, PRESETS};

fn main() -> ExitCode {
    logging::init_logging();
    let args: Vec<String> = std::env::args().collect();
    let config = AppConfig::from_env();

    let mut service = build_editor_service(&config);
    service.subscribe(
        SessionEventKind::PresetApplied,
        Box::new(|event: &SessionEvent| {
            if let SessionEvent::PresetApplied { preset } = event {
                println!("preset {preset} applied");
            }
        }),
    );
    service.subscribe(
        SessionEventKind::ParameterChanged,
        Box::new(|event: &SessionEvent| {
            if let SessionEvent::ParameterChanged { name, value } = event {
                println!("{name} set to {value}");
            }
        }),
    );
    if let Err(error) = service.bootstrap_gallery(BootstrapGalleryCommand) {
        log::error!("failed to open gallery at {}: {error}", config.gallery_path);
        return ExitCode::from(1);
    }

    let command = parse_command(&args);
    match run_command(command, &service) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_editor_service(config: &AppConfig) -> EditorService {
    EditorService::new(
        Box::new(ImageCrateDecoder),
        Box::new(BackgroundDecodeQueue::new()),
        Box::new(CpuFilterRenderer),
        Box::new(PngImageEncoder),
        Box::new(SqliteGalleryStore::new(config.gallery_path.clone())),
        Box::new(FsExportSink::new(config.export_dir.clone())),
        Box::new(SystemClock),
    )
}

#[derive(Debug, Clone, PartialEq)]
enum EditStep {
    Preset(String),
    Set { name: String, value: f32 },
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Presets,
    Params,
    Gallery,
    Edit {
        image_path: String,
        steps: Vec<EditStep>,
        save: bool,
        download: bool,
    },
    View {
        image_path: String,
    },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn parse_command(args: &[String]) -> Result<Command, CommandError> {
    if args.len() <= 1 {
        return Err(CommandError::Usage("missing command".to_string()));
    }

    match args[1].as_str() {
        "presets" => Ok(Command::Presets),
        "params" => Ok(Command::Params),
        "gallery" => Ok(Command::Gallery),
        "view" => {
            let image_path = args
                .get(2)
                .ok_or_else(|| CommandError::Usage("missing image path".to_string()))?;
            Ok(Command::View {
                image_path: image_path.clone(),
            })
        }
        "edit" => parse_edit(&args[2..]),
        other => Err(CommandError::Usage(format!("unknown command: {other}"))),
    }
}

fn parse_edit(args: &[String]) -> Result<Command, CommandError> {
    let image_path = args
        .first()
        .filter(|arg| !arg.starts_with("--"))
        .ok_or_else(|| CommandError::Usage("missing image path".to_string()))?
        .clone();

    let mut steps = Vec::new();
    let mut save = false;
    let mut download = false;
    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--preset" => {
                let name = rest
                    .next()
                    .ok_or_else(|| CommandError::Usage("--preset needs a name".to_string()))?;
                steps.push(EditStep::Preset(name.clone()));
            }
            "--set" => {
                let pair = rest.next().ok_or_else(|| {
                    CommandError::Usage("--set needs NAME=VALUE".to_string())
                })?;
                let (name, value) = pair.split_once('=').ok_or_else(|| {
                    CommandError::Usage(format!("expected NAME=VALUE, got {pair}"))
                })?;
                let value = value
                    .parse::<f32>()
                    .map_err(|_| CommandError::Usage(format!("invalid value for {name}: {value}")))?;
                steps.push(EditStep::Set {
                    name: name.to_string(),
                    value,
                });
            }
            "--save" => save = true,
            "--download" => download = true,
            other => return Err(CommandError::Usage(format!("unknown option: {other}"))),
        }
    }

    Ok(Command::Edit {
        image_path,
        steps,
        save,
        // Without an explicit target the edit is at least written out.
        download: download || !save,
    })
}

fn run_command(
    command: Result<Command, CommandError>,
    service: &EditorService,
) -> Result<(), CommandError> {
    match command? {
        Command::Presets => {
            for preset in &PRESETS {
                println!("{}", present_preset_row(preset));
            }
            Ok(())
        }
        Command::Params => {
            for param in FilterState::default().iter() {
                println!("{}", present_parameter_row(param));
            }
            Ok(())
        }
        Command::Gallery => {
            let entries = service.list_gallery(ListGalleryQuery);
            if entries.is_empty() {
                println!("gallery is empty");
                return Ok(());
            }
            for (index, entry) in entries.iter().enumerate() {
                println!("{}", present_gallery_row(index, entry));
            }
            Ok(())
        }
        Command::Edit {
            image_path,
            steps,
            save,
            download,
        } => run_edit(service, &image_path, steps, save, download),
        Command::View { image_path } => {
            let bytes = read_image(&image_path)?;
            let mut session = EditingSession::new();
            ui::launch_viewer(service, &mut session, bytes).map_err(CommandError::Runtime)
        }
    }
}

fn run_edit(
    service: &EditorService,
    image_path: &str,
    steps: Vec<EditStep>,
    save: bool,
    download: bool,
) -> Result<(), CommandError> {
    let mut session = EditingSession::new();
    let bytes = read_image(image_path)?;
    let (width, height) = service
        .load_image(&mut session, LoadImageCommand { bytes })
        .map_err(|error| CommandError::Runtime(format!("open failed: {error}")))?;
    println!("opened {image_path} ({width}x{height})");

    for step in steps {
        let result = match step {
            EditStep::Preset(name) => service.apply_preset(&mut session, ApplyPresetCommand { name }),
            EditStep::Set { name, value } => service
                .set_parameter(&mut session, SetParameterCommand { name, value })
                .map(|_| ()),
        };
        result.map_err(|error| CommandError::Runtime(format!("edit failed: {error}")))?;
    }

    for param in session.filters().iter() {
        println!("{}", present_parameter_row(param));
    }
    println!("filter: {}", session.filters().composition());

    if download {
        let location = service
            .download(&session, DownloadCommand)
            .map_err(|error| CommandError::Runtime(format!("download failed: {error}")))?;
        println!("wrote {location}");
    }
    if save {
        let gallery_len = service
            .save(&mut session, SaveCommand)
            .map_err(|error| CommandError::Runtime(format!("save failed: {error}")))?;
        println!("saved to gallery ({gallery_len} entries)");
    }
    Ok(())
}

fn read_image(path: &str) -> Result<Vec<u8>, CommandError> {
    std::fs::read(path).map_err(|error| CommandError::Runtime(format!("cannot read {path}: {error}")))
}

fn print_usage() {
    println!("usage:");
    println!("  filter-studio presets");
    println!("  filter-studio params");
    println!("  filter-studio gallery");
    println!("  filter-studio edit <image> [--preset NAME] [--set NAME=VALUE]... [--save] [--download]");
    println!("  filter-studio view <image>");
}
