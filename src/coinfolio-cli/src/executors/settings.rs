//! Settings commands.

use coinfolio_commands::{
    ArgumentCount, Command, CommandContext, CommandError, CommandRegistry, CommandSignature,
    OneOf, Prefix, RegistryError,
};
use coinfolio_common::ReportingProfile;
use tracing::info;

use crate::services::{Services, SettingsStore, Shared};

pub fn registry(services: &Services) -> Result<CommandRegistry, RegistryError> {
    let settings = Prefix::new("settings");
    let get = settings.join("get");
    let set = settings.join("set");

    CommandRegistry::new("Settings")
        .with(ListSettingsCommand::new(get.clone(), services))?
        .with(GetProfileCommand::new(get.join("reporting profile"), services))?
        .with(SetProfileCommand::new(set.join("reporting profile"), services))
}

/// `settings get`: every setting with its current value.
pub struct ListSettingsCommand {
    signature: CommandSignature,
    settings: Shared<SettingsStore>,
}

impl ListSettingsCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .describe("List all settings")
                .constraint(ArgumentCount::none()),
            settings: services.settings.clone(),
        }
    }
}

impl Command for ListSettingsCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, _: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        for (name, value) in self.settings.borrow().entries() {
            ctx.console.output(&format!("{name}: {value}"));
        }
        Ok(true)
    }
}

pub struct GetProfileCommand {
    signature: CommandSignature,
    settings: Shared<SettingsStore>,
}

impl GetProfileCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .describe("Show the reporting profile")
                .constraint(ArgumentCount::none()),
            settings: services.settings.clone(),
        }
    }
}

impl Command for GetProfileCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, _: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        let profile = self.settings.borrow().reporting_profile();
        ctx.console.output(&format!("reporting profile: {profile}"));
        Ok(true)
    }
}

pub struct SetProfileCommand {
    signature: CommandSignature,
    settings: Shared<SettingsStore>,
}

impl SetProfileCommand {
    pub fn new(prefix: Prefix, services: &Services) -> Self {
        Self {
            signature: CommandSignature::new(prefix)
                .arguments("<profile>")
                .describe("Change the reporting profile (summary, detailed, compact)")
                .constraint(ArgumentCount::exactly(1))
                .constraint(OneOf::new(0, ReportingProfile::ALL.map(|p| p.as_str()))),
            settings: services.settings.clone(),
        }
    }
}

impl Command for SetProfileCommand {
    fn signature(&self) -> &CommandSignature {
        &self.signature
    }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        // Constraints already checked the name.
        let profile: ReportingProfile = args
            .first()
            .copied()
            .unwrap_or_default()
            .parse()
            .map_err(|e| CommandError::InvalidState(format!("{e}")))?;

        let previous = self.settings.borrow().reporting_profile();
        self.settings.borrow_mut().set_reporting_profile(profile);
        info!(%previous, current = %profile, "Reporting profile changed");

        ctx.console.notice(&format!("Reporting profile set to {profile}"));
        Ok(true)
    }
}
