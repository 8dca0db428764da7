use std::{fs, io::Cursor};

use tempfile::tempdir;

use strata_cli::{Args, Command, Target, run_with};

fn args(command: Command) -> Args {
    Args {
        config: None,
        log_level: "off".to_string(),
        command,
    }
}

fn run_capture(args: &Args, input: &str) -> Result<String, strata::StrataError> {
    let mut out = Vec::new();
    run_with(args, Cursor::new(input), &mut out)?;
    Ok(String::from_utf8(out).expect("CLI output is UTF-8"))
}

#[test]
fn e2e_render_overview_and_single_diagrams() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    for diagram in [None, Some("virtualization"), Some("containerization")] {
        let output_path = temp_dir
            .path()
            .join(format!("{}.svg", diagram.unwrap_or("overview")));
        let args = args(Command::Render {
            output: output_path.to_string_lossy().to_string(),
            diagram: diagram.map(str::to_string),
            select: Some(Target {
                diagram: "virtualization".to_string(),
                id: "hypervisor".to_string(),
            }),
        });

        run_capture(&args, "").expect("render succeeds");

        let svg = fs::read_to_string(&output_path).expect("SVG was written");
        assert!(svg.contains("<svg"), "Output should contain SVG tag");
        assert!(svg.contains("</svg>"), "Output should be complete SVG");

        let highlighted = svg.matches("component selected").count();
        match diagram {
            Some("containerization") => assert_eq!(highlighted, 0),
            _ => assert_eq!(highlighted, 1),
        }
    }
}

#[test]
fn e2e_render_rejects_unknown_selection() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("out.svg");

    let args = args(Command::Render {
        output: output_path.to_string_lossy().to_string(),
        diagram: None,
        select: Some(Target {
            diagram: "virtualization".to_string(),
            id: "nonexistent-id".to_string(),
        }),
    });

    assert!(run_capture(&args, "").is_err());
    assert!(!output_path.exists());
}

#[test]
fn e2e_list_show_and_shortcuts() {
    let text = run_capture(&args(Command::List { diagram: None }), "").unwrap();
    assert!(text.contains("Virtualization Architecture (virtualization)"));
    assert!(text.contains("Containerization Architecture (containerization)"));

    let text = run_capture(
        &args(Command::Show {
            diagram: "containerization".to_string(),
            id: "container-runtime".to_string(),
        }),
        "",
    )
    .unwrap();
    assert!(text.starts_with("Container Runtime\n"));
    assert!(text.contains("Docker Engine"));

    let text = run_capture(&args(Command::Shortcuts), "").unwrap();
    assert!(text.contains("Physical Server (All)"));
}

#[test]
fn e2e_interactive_session() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("session.svg");

    let script = "\
select virtualization hypervisor
select virtualization nonexistent-id

press Host OS
show
clear
quit
";
    let text = run_capture(
        &args(Command::Interactive {
            output: Some(output_path.to_string_lossy().to_string()),
        }),
        script,
    )
    .unwrap();

    assert!(text.contains("Hypervisor\n----------"));
    assert!(text.contains("error: component `nonexistent-id`"));
    assert!(text.contains("Host OS\n-------"));
    assert!(text.trim_end().ends_with("Select a component to see its details."));

    let svg = fs::read_to_string(&output_path).expect("SVG was written");
    assert!(!svg.contains("component selected"));
}

#[test]
fn e2e_missing_config_file() {
    let mut args = args(Command::Shortcuts);
    args.config = Some("does/not/exist.toml".to_string());

    let err = run_capture(&args, "").unwrap_err();
    assert!(matches!(err, strata::StrataError::Config(_)), "{err:?}");
}
