//! Labsight: lab result classification and assistant briefing.
//!
//! Prints the sample report, its quick insights and the assistant context.
//! Any command-line arguments are joined into a question and answered with
//! the offline assistant.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use labsight::adapters::sanitize::SanitizingMakeWriter;
use labsight::adapters::{JsonLinesAuditSink, TemplateAssistant, TracingAuditSink};
use labsight::application::audit::privacy_info;
use labsight::application::chat::{medical_disclaimer, privacy_notice};
use labsight::application::{
    build_context, parse_sample_report, summarize, AuditLogger, ChatService,
};
use labsight::ports::{AuditEvent, AuditSink};

fn main() -> Result<()> {
    // Initialize logging.
    //
    // Logs go to stderr by default so the report on stdout stays clean.
    // LABSIGHT_LOG_MODE=file sends them to LABSIGHT_LOG_FILE instead.
    let log_mode = std::env::var("LABSIGHT_LOG_MODE").unwrap_or_else(|_| "stderr".to_string());

    let (writer, _guard) = if log_mode == "file" {
        let log_file = std::env::var("LABSIGHT_LOG_FILE")
            .unwrap_or_else(|_| "labsight.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Labsight...");

    let session_token = new_session_token();
    let audit = build_audit_logger()?;

    let records = parse_sample_report();
    audit.log(&session_token, AuditEvent::ReportLoaded, "sample_report");

    println!("{}\n", medical_disclaimer());
    println!("Lab Results Overview");
    println!(
        "{:<2} {:<20} {:>14} {:<12} {:<10} {}",
        "", "Test", "Value", "Reference", "Status", "Description"
    );
    for record in &records {
        println!(
            "{:<2} {:<20} {:>14} {:<12} {:<10} {}",
            record.tier().glyph(),
            record.test_name(),
            format!("{} {}", record.value(), record.unit()),
            record.reference_range(),
            record.tier().label(),
            record.description()
        );
    }

    let insights = summarize(&records);
    println!("\nQuick Insights");
    println!("  Normal Results:     {}", insights.normal);
    println!("  Borderline Results: {}", insights.borderline);
    println!("  Abnormal Results:   {}", insights.abnormal);
    if insights.has_critical() {
        println!("  Critical Results:   {}", insights.critical);
        println!("⚠️ Critical results detected! Consult your healthcare provider immediately.");
    }

    println!("\nAssistant Context\n{}", build_context(&records));

    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if question.trim().is_empty() {
        println!("{}", privacy_notice());
        for line in privacy_info() {
            println!("- {line}");
        }
    } else {
        let chat = ChatService::new(Arc::new(TemplateAssistant), audit);
        let answer = chat.process_query(&question, &records, &session_token);
        println!("Assistant\n{answer}");
    }

    tracing::info!("Labsight shutdown complete.");
    Ok(())
}

/// Audit to the tracing stream, plus a JSON-lines file when
/// LABSIGHT_AUDIT_FILE is set.
fn build_audit_logger() -> Result<AuditLogger> {
    let mut sinks: Vec<Box<dyn AuditSink>> = vec![Box::new(TracingAuditSink)];
    if let Ok(path) = std::env::var("LABSIGHT_AUDIT_FILE") {
        sinks.push(Box::new(JsonLinesAuditSink::append_to(path)?));
    }
    Ok(AuditLogger::with_sinks(sinks))
}

/// Generate a random UUID v4 session token using CSPRNG.
fn new_session_token() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}
