use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tjleasing::application::parameters::format_parameters;
use tjleasing::config::GatewaySettings;
use tjleasing::domain::payment::{PaymentAttempt, PaymentRequest};
use tjleasing::interfaces::report::ReportWriter;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Provider base URL
    #[arg(long, env = "TJLEASING_URL")]
    url: String,

    /// Basic-auth user for the token endpoint
    #[arg(long, env = "TJLEASING_USER", default_value = "")]
    user: String,

    /// Basic-auth password for the token endpoint
    #[arg(long, env = "TJLEASING_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Account used by `check-settings`
    #[arg(long, env = "TJLEASING_TEST_ACCOUNT", default_value = "")]
    test_account: String,

    /// Serve canned responses from this folder instead of calling the provider
    #[arg(long, env = "TJLEASING_EMULATOR_ROOT")]
    emulator_root: Option<PathBuf>,

    #[arg(long, default_value_t = 10)]
    connect_timeout_secs: u64,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up the test account to verify URL and credentials
    CheckSettings,
    /// Verify an account before accepting a payment
    OnlineCheck {
        /// Raw parameter values, substituted into the template
        #[arg(required = true)]
        values: Vec<String>,
        /// Operator parameter template
        #[arg(long, default_value = "ID={0}")]
        template: String,
    },
    /// Check the account, then execute the payment
    Pay {
        account: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = GatewaySettings {
        url: cli.url,
        user: cli.user,
        password: cli.password,
        test_account: cli.test_account,
        emulator_root: cli.emulator_root,
        connect_timeout: Duration::from_secs(cli.connect_timeout_secs),
        request_timeout: Duration::from_secs(cli.timeout_secs),
    };
    let gateway = settings.connect().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut report = ReportWriter::new(stdout.lock());

    match cli.command {
        Command::CheckSettings => {
            let check = gateway.check_settings().await;
            report.write_settings_check(&check).into_diagnostic()?;
        }
        Command::OnlineCheck { values, template } => {
            let params = format_parameters(&values, &template);
            let result = gateway.online_check(&params).await.into_diagnostic()?;
            report.write_online_check(&result).into_diagnostic()?;
        }
        Command::Pay { account, amount } => {
            let request = PaymentRequest::new(&account, amount).into_diagnostic()?;
            let mut attempt = PaymentAttempt::new(request);

            let check = gateway
                .online_check(&format!("ID={}", attempt.request().account_id))
                .await
                .into_diagnostic()?;
            report.write_online_check(&check).into_diagnostic()?;

            if attempt.mark_checked(check.error_code).into_diagnostic()? {
                gateway
                    .process_payment(&mut attempt)
                    .await
                    .into_diagnostic()?;
            } else {
                warn!(
                    error_code = check.error_code.code(),
                    "Online check rejected the account; payment not submitted"
                );
            }
            report.write_payment(&attempt).into_diagnostic()?;
        }
    }

    report.flush().into_diagnostic()?;
    Ok(())
}
