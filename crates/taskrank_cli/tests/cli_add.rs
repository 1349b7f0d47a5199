mod common;

#[test]
fn add_command_succeeds() {
    let output = common::taskrank()
        .args(["add", "demo task", "--hours", "0", "--deps", "a, b ,,c"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Task \"demo task\" added."));
}

#[test]
fn add_command_escapes_title_in_html() {
    let output = common::taskrank()
        .args(["--format", "html", "add", "<b>bold</b>"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"<div class="message success">"#));
    assert!(stdout.contains("&lt;b&gt;bold&lt;/b&gt;"));
}

#[test]
fn add_command_rejects_missing_title() {
    let output = common::taskrank()
        .args(["add", "   "])
        .output()
        .expect("failed to run add command");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Title is required to add a task."));
    assert!(stderr.contains("ERROR: validation"));
}

#[test]
fn add_command_rejects_bad_due_date() {
    let output = common::taskrank()
        .args(["add", "demo", "--due", "next week"])
        .output()
        .expect("failed to run add command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation"));
}
