//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{
    AnyCurriculum, ApplicationError, CrossStandardMapper, Curriculum, CurriculumContext,
    FetchResultExt, TermSource,
};
use crate::cli::args::{Cli, Commands, ConfigCommands, DefinitionArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{DictionaryEntry, Lom, Standard, TermTreeConvert};
use crate::infrastructure::{DefinitionFetcher, FsFetcher};
use crate::util::path::resolve_against;

pub fn execute(cli: &Cli) -> CliResult<()> {
    let project_dir = cli.project_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    match &cli.command {
        Some(Commands::Dump {
            definition,
            lom,
            trees,
            purpose,
            pretty,
        }) => {
            let settings = Settings::load(Some(&project_dir))?;
            dump(
                &settings,
                definition,
                lom.as_deref(),
                *trees,
                purpose.as_deref(),
                *pretty,
            )
        }
        Some(Commands::Lookup {
            definition,
            id,
            json,
        }) => {
            let settings = Settings::load(Some(&project_dir))?;
            lookup(&settings, definition, id, *json)
        }
        Some(Commands::Describe { context }) => {
            let settings = Settings::load(Some(&project_dir))?;
            describe(&settings, *context);
            Ok(())
        }
        Some(Commands::Map { source, target, id }) => map(*source, *target, id),
        Some(Commands::Config { command }) => config(command, &project_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `dsb --help`".to_string(),
        )),
    }
}

/// Definition file name inside `definitions_dir`.
fn default_definition_file(context: CurriculumContext, settings: &Settings) -> String {
    match context {
        CurriculumContext::EducaJson => "educa.json".to_string(),
        CurriculumContext::Lp21Xml => "lp21.xml".to_string(),
        CurriculumContext::PerApi => settings.per.index_locator.clone(),
        CurriculumContext::ClassificationSystemJson => "classification_system.json".to_string(),
    }
}

/// Read the definition payload and parse it.
///
/// Remote API pages are read from a mirror next to the index payload.
#[instrument(level = "debug", skip(settings))]
fn load_curriculum(settings: &Settings, definition: &DefinitionArgs) -> CliResult<AnyCurriculum> {
    let context = definition.context;
    let (fetcher, locator) = match &definition.file {
        Some(file) => {
            let path = resolve_against(Path::new("."), file);
            let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| CliError::InvalidArgs(format!("not a file: {}", file.display())))?;
            (FsFetcher::new(base), name)
        }
        None => (
            FsFetcher::new(settings.definitions_dir.clone()),
            default_definition_file(context, settings),
        ),
    };
    debug!("loading {} from {}", context, fetcher.base_dir().display());

    let payload = fetcher.fetch(&locator).with_locator_context(&locator)?;
    Ok(AnyCurriculum::parse(context, &payload, &fetcher)?)
}

#[instrument(level = "debug", skip(settings))]
fn dump(
    settings: &Settings,
    definition: &DefinitionArgs,
    lom: Option<&Path>,
    trees: bool,
    purpose: Option<&str>,
    pretty: bool,
) -> CliResult<()> {
    let mut curriculum = load_curriculum(settings, definition)?;

    if let Some(lom_path) = lom {
        let locator = lom_path.display().to_string();
        let content = std::fs::read_to_string(lom_path).with_locator_context(&locator)?;
        let document = Lom::from_json(&content).map_err(ApplicationError::from)?;
        if trees {
            let records = document
                .curricula()
                .map_err(ApplicationError::from)?;
            curriculum.set_tree_based_on_taxon_tree(&records)?;
        } else {
            let records = document
                .classification()
                .map_err(ApplicationError::from)?;
            let purpose = purpose.unwrap_or(&settings.default_purpose);
            curriculum.set_tree_based_on_taxon_path(&records, purpose)?;
        }
    }

    if curriculum.tree().is_empty() {
        output::warning("tree is empty");
        return Ok(());
    }
    if pretty {
        output::info(&curriculum.tree().to_tree_string());
    } else {
        output::info(&curriculum.ascii_dump());
    }
    Ok(())
}

fn print_entry(entry: &DictionaryEntry, fallback_languages: &[String]) {
    output::header(&entry.id);
    output::field("type", &entry.term_type);
    output::field("name", &entry.name.resolve_or_raw(fallback_languages));
    if let Some(code) = &entry.code {
        output::field("code", code);
    }
    if let Some(url) = &entry.url {
        output::field("url", url);
    }
    if let Some(version) = &entry.version {
        output::field("version", version);
    }
    if !entry.cycles.is_empty() {
        output::field("cycles", &entry.cycles.iter().join(", "));
    }
    if !entry.school_years.is_empty() {
        output::field("school years", &entry.school_years.iter().join(", "));
    }
    if !entry.cantons.is_empty() {
        output::field("cantons", &entry.cantons.iter().join(", "));
    }
}

#[instrument(level = "debug", skip(settings))]
fn lookup(settings: &Settings, definition: &DefinitionArgs, id: &str, json: bool) -> CliResult<()> {
    let curriculum = load_curriculum(settings, definition)?;
    let entry = curriculum.lookup(id).ok_or_else(|| {
        CliError::Usage(format!("{id}: not in the {} dictionary", curriculum.standard()))
    })?;

    if json {
        let rendered = serde_json::to_string_pretty(entry)
            .map_err(ApplicationError::from)?;
        output::info(&rendered);
    } else {
        print_entry(entry, &settings.fallback_languages);
    }
    Ok(())
}

fn describe(settings: &Settings, context: CurriculumContext) {
    output::header(&format!("{} data structure", context));
    for relation in context.describe_data_structure() {
        if relation.child_types.is_empty() {
            output::detail(&relation.term_type);
        } else {
            output::detail(&format!(
                "{} -> {}",
                relation.term_type,
                relation.child_types.iter().join(", ")
            ));
        }
    }

    output::header(&format!("{} term types", context));
    for term_type in context.describe_term_types() {
        let name = term_type.name.resolve_or_raw(&settings.fallback_languages);
        match &term_type.description {
            Some(description) => output::detail(&format!(
                "{}: {} ({})",
                term_type.term_type,
                name,
                description.resolve_or_raw(&settings.fallback_languages)
            )),
            None => output::detail(&format!("{}: {}", term_type.term_type, name)),
        }
    }
}

fn map(source: Standard, target: Standard, id: &str) -> CliResult<()> {
    let mapper = CrossStandardMapper::new();
    let mapped = mapper
        .map_identifier(source, target, id)
        .ok_or_else(|| CliError::Usage(format!("no mapping from {source} to {target}")))?;
    output::info(&mapped);
    Ok(())
}

fn config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            output::header("Config files");
            let paths = global_config_path()
                .into_iter()
                .chain(std::iter::once(local_config_path(project_dir)));
            for path in paths {
                if path.exists() {
                    output::success_detail(&path.display());
                } else {
                    output::failure(&format!("{} (not found)", path.display()));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_each_context_when_choosing_default_file_then_per_uses_index_locator() {
        let settings = Settings::default();
        assert_eq!(
            default_definition_file(CurriculumContext::Lp21Xml, &settings),
            "lp21.xml"
        );
        assert_eq!(
            default_definition_file(CurriculumContext::PerApi, &settings),
            "objectifs"
        );
    }
}
