use clap::Args;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use eyre::{Context, Result};
use strata_ir::{Driver, Framework};
use strata_manifest::Manifest;

use super::GlobalArgs;

#[derive(Args)]
pub struct InitCommand {
    /// Project name (defaults to the output directory name)
    pub name: Option<String>,

    /// Database driver (mysql, postgres, sqlite)
    #[arg(long)]
    pub driver: Option<Driver>,

    /// Enable frontend scaffolds in `strata generate`
    #[arg(long)]
    pub frontend: Option<Framework>,

    /// Accept defaults without prompting
    #[arg(short, long)]
    pub yes: bool,
}

impl InitCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let path = global.config_path();
        if path.exists() {
            eyre::bail!("{} already exists", path.display());
        }

        let mut manifest = Manifest::new(self.project_name(global)?);
        manifest.database.driver = match self.driver {
            Some(driver) => driver,
            None if self.yes => Driver::default(),
            None => Self::prompt_driver()?,
        };
        match self.frontend {
            Some(framework) => {
                manifest.frontend.enabled = true;
                manifest.frontend.framework = framework;
            }
            None if self.yes => {}
            None => {
                if let Some(framework) = Self::prompt_frontend()? {
                    manifest.frontend.enabled = true;
                    manifest.frontend.framework = framework;
                }
            }
        }

        strata_core::create_new(&path, &manifest.to_toml())
            .wrap_err_with(|| format!("Failed to create {}", path.display()))?;

        println!("Created {}", path.display());
        println!();
        println!("Next steps:");
        println!("  strata generate Post --fields \"title:string!,body:text\"");

        Ok(())
    }

    fn project_name(&self, global: &GlobalArgs) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        let root = global
            .output
            .canonicalize()
            .wrap_err("Failed to resolve the output directory")?;
        let default = root
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| eyre::eyre!("Output directory has no valid name"))?
            .to_string();
        if self.yes {
            return Ok(default);
        }
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Project name")
            .default(default)
            .interact_text()
            .wrap_err("Failed to read project name")
    }

    fn prompt_driver() -> Result<Driver> {
        let drivers = ["MySQL", "PostgreSQL", "SQLite"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a database")
            .items(&drivers)
            .default(0)
            .interact()
            .wrap_err("Failed to get database selection")?;

        Ok(match selection {
            0 => Driver::Mysql,
            1 => Driver::Postgres,
            _ => Driver::Sqlite,
        })
    }

    fn prompt_frontend() -> Result<Option<Framework>> {
        let enabled = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Scaffold a frontend with each entity?")
            .default(false)
            .interact()
            .wrap_err("Failed to get frontend selection")?;
        if !enabled {
            return Ok(None);
        }

        let frameworks = ["React", "Vue"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a framework")
            .items(&frameworks)
            .default(0)
            .interact()
            .wrap_err("Failed to get framework selection")?;

        Ok(Some(match selection {
            0 => Framework::React,
            _ => Framework::Vue,
        }))
    }
}
