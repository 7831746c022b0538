//! Integration tests for the pocket REPL.
//!
//! These run line sequences through a REPL and check what it prints.

use std::io::Write;

use pocket_repl::{EXIT_SIGNAL, Repl, ReplConfig, load_tree};
use pocket_vfs::{ActiveFile, Tree};
use rstest::rstest;

fn plain_repl() -> Repl {
    let config = ReplConfig {
        color: false,
        history: false,
        ..ReplConfig::default()
    };
    Repl::with_config(&config).expect("Failed to create REPL")
}

/// Run lines through a REPL and collect outputs.
fn run_script(repl: &mut Repl, script: &str) -> Vec<String> {
    let mut outputs = Vec::new();
    for line in script.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match repl.process_line(trimmed) {
            Ok(Some(output)) => outputs.push(output),
            Ok(None) => {}
            Err(e) => outputs.push(format!("ERROR: {e}")),
        }
    }
    outputs
}

#[test]
fn test_shell_session() {
    let mut repl = plain_repl();
    let outputs = run_script(
        &mut repl,
        r#"
        mkdir app
        touch app/index.js
        cat app/index.js
        mv app lib
        ls .
        rm lib
        ls
        "#,
    );
    assert_eq!(outputs, ["README.md\nlib/", "README.md"]);
}

#[test]
fn test_tool_calls_share_the_workspace() {
    let mut repl = plain_repl();
    let outputs = run_script(
        &mut repl,
        r#"
        /tool create_directory {"directory_path": "web"}
        /tool write_file {"file_path": "web/index.html", "content": "<h1>hi</h1>"}
        cat web/index.html
        /tool execute_terminal_command {"command": "ls web"}
        /tool read_file
        /tool read_file {oops
        "#,
    );
    assert_eq!(outputs[0], "Successfully created directory web");
    assert_eq!(outputs[1], "Successfully wrote to web/index.html");
    assert_eq!(outputs[2], "<h1>hi</h1>");
    assert_eq!(outputs[3], "Command executed. Output:\nindex.html");
    assert_eq!(outputs[4], "Error: Missing required argument 'file_path' for tool 'read_file'");
    assert!(outputs[5].starts_with("Error: invalid JSON arguments"));
    assert_eq!(
        repl.vfs().active_file(),
        ActiveFile::Open("/web/index.html".into())
    );
}

#[test]
fn test_open_resolves_against_cwd() {
    let mut repl = plain_repl();
    let outputs = run_script(
        &mut repl,
        r#"
        /open
        mkdir docs
        cd docs
        touch notes.md
        /open notes.md
        /open ghost
        /close
        /open
        "#,
    );
    let readme = format!("--- /README.md\n{}", pocket_vfs::WELCOME_README);
    assert_eq!(
        outputs,
        [
            readme.as_str(),
            "--- /docs/notes.md\n",
            "Error: No such file or directory: /docs/ghost",
            "(no file open)",
        ]
    );
}

#[test]
fn test_open_shows_content() {
    let mut repl = plain_repl();
    let out = repl.process_line("/open README.md").unwrap().unwrap();
    assert_eq!(out, format!("--- /README.md\n{}", pocket_vfs::WELCOME_README));
}

#[rstest]
#[case::quit("/quit")]
#[case::short("/q")]
#[case::exit("/exit")]
fn test_exit_commands(#[case] line: &str) {
    let mut repl = plain_repl();
    let err = repl.process_line(line).unwrap_err();
    assert_eq!(err.to_string(), EXIT_SIGNAL);
}

#[test]
fn test_tree_and_history() {
    let mut repl = plain_repl();
    let outputs = run_script(
        &mut repl,
        r#"
        mkdir src
        touch src/main.rs
        /tree
        /history
        "#,
    );
    assert_eq!(outputs[0], "- README.md\n- src\n  - main.rs");
    assert_eq!(outputs[1], "   1  mkdir src\n   2  touch src/main.rs");
}

#[test]
fn test_snapshot_round_trips_through_seed() {
    let mut repl = plain_repl();
    run_script(&mut repl, "mkdir a\ntouch a/b.txt");
    let json = repl.process_line("/snapshot").unwrap().unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    assert_eq!(load_tree(file.path()).unwrap(), repl.vfs().snapshot());

    let seeded = Repl::with_config(&ReplConfig {
        seed: Some(file.path().to_path_buf()),
        history: false,
        ..ReplConfig::default()
    })
    .unwrap();
    assert!(seeded.vfs().exists("/a/b.txt"));
    assert_eq!(seeded.vfs().active_file(), ActiveFile::Open("/README.md".into()));
}

#[test]
fn test_bad_seed_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"not json").unwrap();
    let config = ReplConfig {
        seed: Some(file.path().to_path_buf()),
        ..ReplConfig::default()
    };
    let err = Repl::with_config(&config).err().unwrap();
    assert!(err.to_string().starts_with("Failed to parse workspace"));
    assert!(Tree::from_json("{}").is_err());
}
