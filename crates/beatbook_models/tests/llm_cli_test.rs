#![cfg(unix)]

// Tests for the CLI driver using ordinary shell utilities as stand-in tools.

use beatbook_core::GenerateRequest;
use beatbook_error::{BeatbookErrorKind, GenerationErrorKind};
use beatbook_interface::TextGenerator;
use beatbook_models::{CliSettings, LlmCli};
use std::time::Duration;

fn shell(script: &str) -> LlmCli {
    LlmCli::new(
        CliSettings::builder()
            .program("sh")
            .args(vec!["-c".to_string(), script.to_string()])
            .build()
            .expect("valid settings"),
    )
}

fn request(prompt: &str, timeout: Option<Duration>) -> GenerateRequest {
    GenerateRequest::builder()
        .prompt(prompt)
        .timeout(timeout)
        .build()
        .expect("valid request")
}

fn generation_kind(err: &beatbook_error::BeatbookError) -> &GenerationErrorKind {
    match err.kind() {
        BeatbookErrorKind::Generation(e) => e.kind(),
        other => panic!("expected generation error, got {other}"),
    }
}

#[tokio::test]
async fn test_prompt_is_delivered_on_stdin() -> anyhow::Result<()> {
    let cli = LlmCli::new(CliSettings::builder().program("cat").build()?);

    let response = cli.generate(&request("Who runs the sheriff's office?", None)).await?;

    assert_eq!(response.text(), "Who runs the sheriff's office?");
    Ok(())
}

#[tokio::test]
async fn test_stdout_is_returned_verbatim() -> anyhow::Result<()> {
    let cli = shell("cat > /dev/null; printf '  # Beat Book\\n\\n'");

    let response = cli.generate(&request("prompt", None)).await?;

    assert_eq!(response.text(), "  # Beat Book\n\n");
    Ok(())
}

#[tokio::test]
async fn test_model_flag_is_appended() -> anyhow::Result<()> {
    // With `sh -c`, trailing arguments become $0, $1, ...
    let cli = LlmCli::new(
        CliSettings::builder()
            .program("sh")
            .args(vec![
                "-c".to_string(),
                "cat > /dev/null; echo \"$0 $1\"".to_string(),
            ])
            .model(Some("claude-sonnet".to_string()))
            .build()?,
    );

    let response = cli.generate(&request("prompt", None)).await?;
    assert_eq!(response.text().trim(), "-m claude-sonnet");

    let overridden = GenerateRequest::builder()
        .prompt("prompt")
        .model(Some("gpt-4o".to_string()))
        .build()?;
    let response = cli.generate(&overridden).await?;
    assert_eq!(response.text().trim(), "-m gpt-4o");
    Ok(())
}

#[tokio::test]
async fn test_non_zero_exit_reports_stderr() {
    let cli = shell("cat > /dev/null; echo 'Error: No key found' >&2; exit 3");

    let err = cli
        .generate(&request("prompt", None))
        .await
        .expect_err("non-zero exit must fail");

    assert_eq!(
        generation_kind(&err),
        &GenerationErrorKind::NonZeroExit {
            status: 3,
            stderr: "Error: No key found".to_string(),
        }
    );
}

#[tokio::test]
async fn test_exit_without_reading_stdin_is_judged_by_status() -> anyhow::Result<()> {
    let cli = shell("echo ok");
    let long_prompt = "x".repeat(512 * 1024);

    let response = cli.generate(&request(&long_prompt, None)).await?;

    assert_eq!(response.text().trim(), "ok");
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_enforced() {
    let cli = shell("sleep 5");

    let err = cli
        .generate(&request("prompt", Some(Duration::from_secs(1))))
        .await
        .expect_err("call must time out");

    assert_eq!(
        generation_kind(&err),
        &GenerationErrorKind::Timeout { secs: 1 }
    );
}

#[tokio::test]
async fn test_missing_program_fails_to_spawn() {
    let cli = LlmCli::new(
        CliSettings::builder()
            .program("beatbook-no-such-tool")
            .build()
            .expect("valid settings"),
    );

    let err = cli
        .generate(&request("prompt", None))
        .await
        .expect_err("spawn must fail");

    assert!(matches!(
        generation_kind(&err),
        GenerationErrorKind::Spawn { program, .. } if program == "beatbook-no-such-tool"
    ));
}
