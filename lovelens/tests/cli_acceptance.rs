use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
    chats: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");
        let chats = base.join("chats");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");
        fs::create_dir_all(&chats).expect("failed to create chat directory");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
            chats,
        }
    }

    /// Copy a core fixture into the sandbox and return its path.
    fn seed_chat(&self, fixture: &str) -> PathBuf {
        let source = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../lovelens-core/tests/fixtures")
            .join(fixture);
        let target = self.chats.join(fixture);
        fs::copy(source, &target).expect("failed to copy chat fixture");
        target
    }

    fn log_dir(&self) -> PathBuf {
        self.xdg_state.join("lovelens")
    }
}

fn run_bin(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("lovelens"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute lovelens: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "lovelens {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

#[test]
fn json_export_reports_couple_snapshot() {
    let env = CliTestEnv::new();
    let chat = env.seed_chat("couple.txt");
    let chat = chat.to_str().expect("non-utf8 temp path");

    let args = [chat, "--export", "json", "--now", "2024-01-10"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["total_messages"], 12);
    assert_eq!(json["participants"], serde_json::json!(["Alice", "Bob"]));
    assert_eq!(json["streak"]["current"], 1);
    assert_eq!(json["streak"]["longest"], 3);
    assert_eq!(json["call_stats"]["total_calls"], 2);
    assert_eq!(json["evaluated_on"], "2024-01-10");

    assert!(
        env.log_dir().is_dir(),
        "logs should land in {}",
        env.log_dir().display()
    );
}

#[test]
fn terminal_report_shows_score_and_streaks() {
    let env = CliTestEnv::new();
    let chat = env.seed_chat("couple.txt");
    let chat = chat.to_str().expect("non-utf8 temp path");

    let args = [chat, "--now", "2024-01-10"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Alice & Bob"), "got:\n{stdout}");
    assert!(stdout.contains("LOVE SCORE"));
    assert!(stdout.contains("Current: 1 days"));
    assert!(stdout.contains("Longest: 3 days"));
}

#[test]
fn markdown_export_has_sections() {
    let env = CliTestEnv::new();
    let chat = env.seed_chat("couple.txt");
    let chat = chat.to_str().expect("non-utf8 temp path");

    let args = [chat, "--export", "md", "--now", "2024-01-10"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Alice & Bob"));
    assert!(stdout.contains("## Love Score"));
    assert!(stdout.contains("| Longest streak | 3 days |"));
}

#[test]
fn group_chat_is_rejected() {
    let env = CliTestEnv::new();
    let chat = env.seed_chat("group.txt");
    let chat = chat.to_str().expect("non-utf8 temp path");

    let output = run_bin(&env, &[chat]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("exactly two people"),
        "expected participant error, got:\n{stderr}"
    );
}

#[test]
fn unrecognised_export_is_rejected_with_sample() {
    let env = CliTestEnv::new();
    let chat = env.seed_chat("garbage.txt");
    let chat = chat.to_str().expect("non-utf8 temp path");

    let output = run_bin(&env, &[chat]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no valid messages found"), "got:\n{stderr}");
    assert!(stderr.contains("this is not a chat export"));
}

#[test]
fn unknown_export_format_fails() {
    let env = CliTestEnv::new();
    let chat = env.seed_chat("couple.txt");
    let chat = chat.to_str().expect("non-utf8 temp path");

    let output = run_bin(&env, &[chat, "--export", "pdf"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown export format"));
}

#[test]
fn config_overrides_are_applied() {
    let env = CliTestEnv::new();
    let chat = env.seed_chat("couple.txt");
    let chat = chat.to_str().expect("non-utf8 temp path");

    let config_dir = env.xdg_config.join("lovelens");
    fs::create_dir_all(&config_dir).expect("failed to create config dir");
    fs::write(
        config_dir.join("config.toml"),
        "[lexicon]\nmorning_greetings = [\"sunshine\"]\n",
    )
    .expect("failed to write config");

    let args = [chat, "--export", "json", "--now", "2024-01-10"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["insights"]["good_morning_count"], 1);
}

#[test]
fn missing_file_fails() {
    let env = CliTestEnv::new();
    let missing = env.chats.join("nope.txt");
    let missing = missing.to_str().expect("non-utf8 temp path");

    let output = run_bin(&env, &[missing]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to parse"));
}
