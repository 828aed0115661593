use super::*;

#[test]
fn test_dot_format_skips_renderer() {
    // The binary does not exist; Dot must never try to spawn it.
    let config = PlotConfig::new().with_dot_binary("/nonexistent/graphviz/dot");
    let out = dottify("digraph {}\n", OutputFormat::Dot, &config).unwrap();
    assert_eq!(out, b"digraph {}\n");
}

#[test]
fn test_missing_binary_is_io_error() {
    let config = PlotConfig::new().with_dot_binary("/nonexistent/graphviz/dot");
    let err = dottify("digraph {}\n", OutputFormat::Png, &config).unwrap_err();
    assert!(matches!(err, PlotError::Io(_)), "got {:?}", err);
}

#[cfg(unix)]
#[test]
fn test_stub_renderers() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let dir = std::env::temp_dir().join(format!("orchid-lineage-graphviz-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let script = |name: &str, body: &str| {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    };
    // All scripts are written before anything is spawned.
    let echo = script("echo-dot", "cat");
    let failing = script("failing-dot", "echo \"syntax error in line 1\" >&2\nexit 3");
    let slow = script("slow-dot", "exec sleep 5");

    // Renderer output is passed through.
    let config = PlotConfig::new().with_dot_binary(&echo);
    let out = dottify("digraph { N0 }\n", OutputFormat::Svg, &config).unwrap();
    assert_eq!(out, b"digraph { N0 }\n");

    // Non-zero exit surfaces stderr.
    let config = PlotConfig::new().with_dot_binary(&failing);
    match dottify("digraph {}\n", OutputFormat::Png, &config) {
        Err(PlotError::Render(msg)) => assert_eq!(msg, "syntax error in line 1"),
        other => panic!("expected Render error, got {:?}", other),
    }

    // Hung renderer is killed.
    let config = PlotConfig::new()
        .with_dot_binary(&slow)
        .with_render_timeout(Duration::from_millis(200));
    let started = Instant::now();
    match dottify("digraph {}\n", OutputFormat::Jpg, &config) {
        Err(PlotError::RenderTimeout(t)) => assert_eq!(t, Duration::from_millis(200)),
        other => panic!("expected RenderTimeout, got {:?}", other),
    }
    assert!(started.elapsed() < Duration::from_secs(4));

    let _ = fs::remove_dir_all(&dir);
}
