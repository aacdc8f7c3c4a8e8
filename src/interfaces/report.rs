use crate::application::gateway::{OnlineCheckResult, SettingsCheck};
use crate::domain::payment::PaymentAttempt;
use std::io::{self, Write};

/// Writes operation results as `key=value` lines for the calling platform.
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_settings_check(&mut self, check: &SettingsCheck) -> io::Result<()> {
        match check {
            SettingsCheck::Ok => writeln!(self.writer, "settings=ok"),
            SettingsCheck::Rejected { status, body } => {
                writeln!(self.writer, "settings=rejected")?;
                writeln!(self.writer, "status={}", status)?;
                writeln!(self.writer, "response={}", body.trim())
            }
            SettingsCheck::Failed(message) => {
                writeln!(self.writer, "settings=failed")?;
                writeln!(self.writer, "error={}", message)
            }
        }
    }

    pub fn write_online_check(&mut self, result: &OnlineCheckResult) -> io::Result<()> {
        writeln!(self.writer, "account={}", result.account_id)?;
        writeln!(self.writer, "error_code={}", result.error_code.code())?;
        for (key, value) in result.extras() {
            writeln!(self.writer, "{}={}", key, value)?;
        }
        Ok(())
    }

    pub fn write_payment(&mut self, attempt: &PaymentAttempt) -> io::Result<()> {
        writeln!(self.writer, "account={}", attempt.request().account_id)?;
        writeln!(self.writer, "amount={}", attempt.request().amount)?;
        writeln!(self.writer, "state={:?}", attempt.state())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
