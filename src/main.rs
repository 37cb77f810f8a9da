mod app;
mod dropzone;
mod upload;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use app::UploaderApp;
use dropzone::DropZone;
use tracing::{error, warn};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/upload";

const HELP: &str = "\
odm_uploader - drag-and-drop uploader for OverDrive .odm files

USAGE:
  odm_uploader [OPTIONS]

OPTIONS:
  -e, --endpoint <URL>  godm upload endpoint (default: http://127.0.0.1:8080/upload)
      --queue <DIR>     spool drops into DIR instead of uploading them
      --no-dnd          disable drag and drop and show the file picker form
  -h, --help            print this help

The environment variables ODM_ENDPOINT, ODM_QUEUE_DIR and ODM_NO_DND
override the corresponding options.
";

struct Options {
    endpoint: String,
    queue_dir: Option<PathBuf>,
    drag_and_drop: bool,
}

fn options_from(mut args: pico_args::Arguments) -> Result<Option<Options>, pico_args::Error> {
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let options = Options {
        endpoint: args
            .opt_value_from_str(["-e", "--endpoint"])?
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        queue_dir: args.opt_value_from_str("--queue")?,
        drag_and_drop: !args.contains("--no-dnd"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        warn!(?remaining, "ignoring unexpected arguments");
    }

    Ok(Some(options))
}

/// Environment overrides flags.
fn apply_env(options: &mut Options) {
    if let Ok(endpoint) = std::env::var("ODM_ENDPOINT") {
        if !endpoint.is_empty() {
            options.endpoint = endpoint;
        }
    }
    if let Ok(dir) = std::env::var("ODM_QUEUE_DIR") {
        if !dir.is_empty() {
            options.queue_dir = Some(PathBuf::from(dir));
        }
    }
    if std::env::var("ODM_NO_DND").is_ok_and(|v| !v.is_empty()) {
        options.drag_and_drop = false;
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let mut options = match options_from(pico_args::Arguments::from_env()) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print!("{}", HELP);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}\n\n{}", e, HELP);
            return ExitCode::FAILURE;
        }
    };
    apply_env(&mut options);

    let zone = match &options.queue_dir {
        Some(dir) => DropZone::queue_into(dir, options.drag_and_drop),
        None => DropZone::submit_to(&options.endpoint, options.drag_and_drop),
    };
    let zone = match zone {
        Ok(zone) => zone,
        Err(e) => {
            error!(error = %e, "failed to initialize the drop zone");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([480.0, 420.0])
            .with_min_inner_size([360.0, 320.0])
            .with_drag_and_drop(options.drag_and_drop),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "ODM Uploader",
        native_options,
        Box::new(move |cc| Box::new(UploaderApp::new(cc, zone))),
    ) {
        error!(error = %e, "application error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> Option<Options> {
        let args = args.iter().map(OsString::from).collect();
        options_from(pico_args::Arguments::from_vec(args)).unwrap()
    }

    #[test]
    fn defaults_point_at_the_local_server() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.endpoint, DEFAULT_ENDPOINT);
        assert!(options.queue_dir.is_none());
        assert!(options.drag_and_drop);
    }

    #[test]
    fn endpoint_and_queue_flags_are_honored() {
        let options = parse(&["--endpoint", "http://books:9090/upload", "--queue", "/tmp/odms"]).unwrap();
        assert_eq!(options.endpoint, "http://books:9090/upload");
        assert_eq!(options.queue_dir, Some(PathBuf::from("/tmp/odms")));
    }

    #[test]
    fn no_dnd_selects_the_fallback_form() {
        let options = parse(&["--no-dnd"]).unwrap();
        assert!(!options.drag_and_drop);
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse(&["--help"]).is_none());
    }
}
