use super::*;
use async_trait::async_trait;
use env_run_core::EnvironmentVariables;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Store that always returns the same secrets and counts fetches
struct FixedStore {
    secrets: EnvironmentVariables,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SecretStore for FixedStore {
    fn has_credentials(&self) -> bool {
        true
    }

    async fn get_secrets(&mut self, _environment: Option<&str>) -> Result<EnvironmentVariables> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.secrets.clone())
    }
}

fn fixed_store(pairs: &[(&str, &str)]) -> (Box<dyn SecretStore>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = FixedStore {
        secrets: pairs.iter().copied().collect(),
        calls: Arc::clone(&calls),
    };
    (Box::new(store), calls)
}

fn config(root: &TempDir) -> Config {
    Config {
        workspace_root: Some(root.path().to_path_buf()),
        ..Config::default()
    }
}

fn options(env_name: Option<&str>, command: &[&str]) -> RunOptions {
    RunOptions {
        env_name: env_name.map(str::to_string),
        command: command.iter().map(|s| s.to_string()).collect(),
        ..RunOptions::default()
    }
}

#[tokio::test]
async fn test_override_file_wins_without_remote() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(".env"), "PORT=3000\n").unwrap();
    fs::write(root.path().join(".env.dev"), "PORT=4000\nNAME=dev\n").unwrap();
    let (store, calls) = fixed_store(&[("PORT", "9999")]);

    let result = EnvRun::new(options(Some("dev"), &[]), config(&root))
        .with_secret_store(store)
        .run()
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result.final_env.get("PORT").map(String::as_str), Some("4000"));
    assert_eq!(result.final_env.get("NAME").map(String::as_str), Some("dev"));
    assert!(!result.used_remote);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_refresh_without_command_writes_cache() {
    let root = TempDir::new().unwrap();
    let (store, calls) = fixed_store(&[("API_KEY", "fresh")]);
    let opts = RunOptions {
        force_refresh: true,
        ..options(Some("staging"), &[])
    };

    let result = EnvRun::new(opts, config(&root))
        .with_secret_store(store)
        .run()
        .await
        .unwrap()
        .unwrap();

    assert!(result.used_remote);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let written = fs::read_to_string(root.path().join(".env.staging")).unwrap();
    assert!(written.contains("API_KEY=fresh"));
}

#[tokio::test]
async fn test_missing_workspace_root_is_an_error() {
    let root = TempDir::new().unwrap();
    let cfg = Config {
        workspace_root: Some(root.path().join("does-not-exist")),
        ..Config::default()
    };
    let (store, _) = fixed_store(&[]);

    let err = EnvRun::new(options(None, &[]), cfg)
        .with_secret_store(store)
        .run()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("not a directory"));
}

#[tokio::test]
async fn test_ci_bypasses_resolution() {
    let root = TempDir::new().unwrap();
    let (store, calls) = fixed_store(&[("A", "1")]);
    let cfg = Config {
        ci: true,
        ..config(&root)
    };

    let result = EnvRun::new(options(Some("dev"), &[]), cfg)
        .with_secret_store(store)
        .run()
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!root.path().join(".env.dev").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_command_sees_resolved_environment() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(".env"), "GREETING=hello\n").unwrap();
    let (store, _) = fixed_store(&[]);
    let opts = RunOptions {
        overrides: vec!["TARGET=world".to_string()],
        ..options(None, &["/bin/sh", "-c", r#"[ "$GREETING $TARGET" = "hello world" ]"#])
    };

    EnvRun::new(opts, config(&root))
        .with_secret_store(store)
        .run()
        .await
        .unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_failing_command_reports_exit_code() {
    let root = TempDir::new().unwrap();
    let (store, _) = fixed_store(&[]);

    let err = EnvRun::new(options(None, &["/bin/sh", "-c", "exit 2"]), config(&root))
        .with_secret_store(store)
        .run()
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), Some(2));
    assert!(err.to_string().contains('2'));
}

#[test]
fn test_root_env_file_replaces_partial_process_credentials() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(".env"),
        "INFISICAL_MACHINE_IDENTITY_CLIENT_ID=file-id\n\
         INFISICAL_MACHINE_IDENTITY_CLIENT_SECRET=file-secret\n\
         INFISICAL_PROJECT_ID=file-project\n",
    )
    .unwrap();
    let process = Credentials {
        client_id: Some("process-id".into()),
        ..Credentials::default()
    };

    let credentials = load_credentials(process, root.path()).unwrap();

    assert_eq!(credentials.client_id.as_deref(), Some("file-id"));
    assert_eq!(credentials.client_secret.as_deref(), Some("file-secret"));
    assert_eq!(credentials.project_id.as_deref(), Some("file-project"));
    assert!(credentials.is_valid());
}

#[test]
fn test_complete_process_credentials_skip_root_env_file() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(".env"),
        "INFISICAL_MACHINE_IDENTITY_CLIENT_ID=file-id\n",
    )
    .unwrap();
    let process = Credentials {
        client_id: Some("id".into()),
        client_secret: Some("secret".into()),
        project_id: Some("proj".into()),
        site_url: None,
    };

    let credentials = load_credentials(process.clone(), root.path()).unwrap();

    assert_eq!(credentials, process);
}
