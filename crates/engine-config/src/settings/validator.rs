use crate::settings::{
    RawSettings, TableMode,
    batch_size::BatchSize,
    error::SettingsError,
    validated::{LoadSettings, LoadSettingsBuilder},
};
use tracing::{info, warn};

/// Turns raw command-line values into [`LoadSettings`].
///
/// Every problem is collected before failing, so a user sees all of them at
/// once. Nothing here touches the filesystem.
pub struct SettingsValidator<'a> {
    raw: &'a RawSettings,
}

impl<'a> SettingsValidator<'a> {
    pub fn new(raw: &'a RawSettings) -> Self {
        Self { raw }
    }

    pub fn validate(&self) -> Result<LoadSettings, SettingsError> {
        let mut builder = LoadSettingsBuilder::new();
        let mut errors: Vec<String> = Vec::new();

        builder = self.validate_paths(builder, &mut errors);
        builder = self.validate_table(builder, &mut errors);
        builder = self.validate_batch_size(builder, &mut errors);
        builder = self.validate_mode(builder, &mut errors);
        builder = self.validate_report(builder, &mut errors);

        if !errors.is_empty() {
            return Err(SettingsError::ValidationFailed(errors));
        }

        let validated = builder.build()?;
        self.log_validated_settings(&validated);
        Ok(validated)
    }

    fn validate_paths(
        &self,
        mut builder: LoadSettingsBuilder,
        errors: &mut Vec<String>,
    ) -> LoadSettingsBuilder {
        if self.raw.input.trim().is_empty() {
            errors.push("input path must not be empty".to_string());
        } else {
            builder = builder.input(&self.raw.input);
        }

        if self.raw.output.trim().is_empty() {
            errors.push("output path must not be empty".to_string());
        } else {
            builder = builder.output(&self.raw.output);
        }

        if !errors.is_empty() {
            return builder;
        }
        if self.raw.input == self.raw.output {
            errors.push("input and output must be different files".to_string());
        }
        builder
    }

    fn validate_table(
        &self,
        builder: LoadSettingsBuilder,
        errors: &mut Vec<String>,
    ) -> LoadSettingsBuilder {
        if self.raw.table.trim().is_empty() {
            errors.push("table name must not be empty".to_string());
            return builder;
        }
        builder.table(&self.raw.table)
    }

    fn validate_batch_size(
        &self,
        builder: LoadSettingsBuilder,
        errors: &mut Vec<String>,
    ) -> LoadSettingsBuilder {
        match BatchSize::new(self.raw.batch_size) {
            Ok(size) => {
                if size.is_large() {
                    warn!(
                        batch_size = size.get(),
                        "Batch size is very large, each transaction will hold many rows"
                    );
                }
                builder.batch_size(size)
            }
            Err(err) => {
                errors.push(err.to_string());
                builder
            }
        }
    }

    fn validate_mode(
        &self,
        builder: LoadSettingsBuilder,
        errors: &mut Vec<String>,
    ) -> LoadSettingsBuilder {
        match self.raw.mode.parse::<TableMode>() {
            Ok(mode) => builder.mode(mode),
            Err(msg) => {
                errors.push(SettingsError::InvalidMode(msg).to_string());
                builder
            }
        }
    }

    fn validate_report(
        &self,
        builder: LoadSettingsBuilder,
        errors: &mut Vec<String>,
    ) -> LoadSettingsBuilder {
        match self.raw.report.as_deref() {
            None => builder,
            Some(path) if path.trim().is_empty() => {
                errors.push("report path must not be empty".to_string());
                builder
            }
            Some(path) => builder.report(path),
        }
    }

    fn log_validated_settings(&self, settings: &LoadSettings) {
        info!(
            input = %settings.input().display(),
            output = %settings.output().display(),
            table = %settings.table(),
            batch_size = settings.batch_size(),
            mode = %settings.mode(),
            "Validated settings"
        );
    }
}
