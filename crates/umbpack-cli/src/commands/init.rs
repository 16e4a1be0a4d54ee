use crate::elicitor::Elicitor;
use crate::errors::InitError;
use crate::logger;
use crate::messages::{self, fill};
use crate::GlobalOpts;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use umbpack_config::Config;
use umbpack_manifest::manifest_writer::target_folder;
use umbpack_manifest::{
    assemble, resolve_target_path, write_to_path, HttpLicenceRegistry, LicenceRegistry,
    LicenceResolver, ManifestDocument, PackageSetup,
};

/// Exit status when the manifest was written
pub const EXIT_WRITTEN: i32 = 0;
/// Exit status when the user declined (or the session failed)
pub const EXIT_ABORTED: i32 = 1;
/// Exit status when the target folder does not exist
pub const EXIT_MISSING_FOLDER: i32 = 2;

const FALLBACK_PACKAGE_NAME: &str = "package";

/// How an init session ended, short of an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Written(PathBuf),
    Aborted,
}

/// Inputs to an init session that come from the environment
#[derive(Debug, Clone, Default)]
pub struct InitContext {
    /// Target folder or file as given on the command line
    pub folder: Option<String>,
    /// Suggested author, normally the OS user name
    pub default_author: String,
    pub config: Config,
}

/// Defaults offered by the prompts that do not depend on earlier answers
#[derive(Debug, Clone)]
pub struct SetupDefaults {
    pub name: String,
    pub version: String,
    pub umbraco_version: String,
    pub author: String,
    pub licence: String,
}

/// Run `umbpack init` against stdin/stdout and return the process exit status
pub fn handle_init(folder: Option<String>, opts: &GlobalOpts) -> i32 {
    logger::debug("Handling init command");

    let config = Config::load().unwrap_or_else(|e| {
        logger::warn(&format!("Failed to load config, using defaults: {}", e));
        Config::default()
    });

    let registry =
        HttpLicenceRegistry::new(config.registry_url()).with_timeout(config.registry_timeout());
    let resolver = LicenceResolver::new(registry).with_fallbacks(config.fallback_licences.clone());

    let ctx = InitContext {
        folder,
        default_author: os_user_name(),
        config,
    };

    let stdin = io::stdin();
    let mut elicitor = Elicitor::new(stdin.lock(), io::stdout());
    let result = run_init(&ctx, &resolver, &mut elicitor);

    match &result {
        Ok(InitOutcome::Written(path)) => {
            logger::success(&format!("Manifest written to {}", path.display()));
        }
        Ok(InitOutcome::Aborted) => logger::info("Init cancelled by user"),
        Err(e) => logger::error(&e.to_string()),
    }

    if opts.verbosity_level() > 0 {
        if let Some(log_path) = logger::get_log_path() {
            logger::info(&format!("Log written to {}", log_path.display()));
        }
    }

    exit_code(&result)
}

/// Map the session result to the process exit status
pub fn exit_code(result: &Result<InitOutcome, InitError>) -> i32 {
    match result {
        Ok(InitOutcome::Written(_)) => EXIT_WRITTEN,
        Ok(InitOutcome::Aborted) => EXIT_ABORTED,
        Err(e) if e.is_missing_folder() => EXIT_MISSING_FOLDER,
        Err(_) => EXIT_ABORTED,
    }
}

/// The whole init flow: resolve the target, ask the questions, preview,
/// confirm and write.
///
/// A missing target folder fails before any question is asked.
pub fn run_init<R: BufRead, W: Write, G: LicenceRegistry>(
    ctx: &InitContext,
    resolver: &LicenceResolver<G>,
    elicitor: &mut Elicitor<R, W>,
) -> Result<InitOutcome, InitError> {
    let path = resolve_target_path(ctx.folder.as_deref())?;
    logger::debug(&format!("Target file: {}", path.display()));

    let defaults = SetupDefaults {
        name: default_package_name(&path),
        version: ctx.config.version_default().to_string(),
        umbraco_version: ctx.config.umbraco_version_default().to_string(),
        author: ctx.default_author.clone(),
        licence: ctx.config.licence_default().to_string(),
    };

    elicitor.say(messages::INIT_HEADER)?;
    elicitor.say("")?;

    let setup = gather_setup(elicitor, &defaults, resolver)?;
    logger::step("Assembling manifest");
    let document = assemble(setup);

    confirm_and_write(elicitor, &document, &path)
}

/// Ask every question in order. Website defaults to the Url answer.
pub fn gather_setup<R: BufRead, W: Write, G: LicenceRegistry>(
    elicitor: &mut Elicitor<R, W>,
    defaults: &SetupDefaults,
    resolver: &LicenceResolver<G>,
) -> Result<PackageSetup, InitError> {
    let name = elicitor.ask_required(messages::PACKAGE_NAME, &defaults.name)?;
    let description = elicitor.ask(messages::DESCRIPTION, "")?;
    let version = elicitor.ask_version(messages::VERSION, &defaults.version)?;
    let url = elicitor.ask(messages::URL, "")?;
    let umbraco_version =
        elicitor.ask_version(messages::UMBRACO_VERSION, &defaults.umbraco_version)?;
    let author = elicitor.ask_required(messages::AUTHOR, &defaults.author)?;
    let website = elicitor.ask(messages::WEBSITE, &url)?;
    let licence = elicitor.ask_licence(messages::LICENCE, &defaults.licence, resolver)?;

    Ok(PackageSetup {
        name,
        description,
        version,
        url,
        umbraco_version,
        author,
        website,
        licence,
    })
}

/// Show the `info` section, ask for confirmation and write on a yes
pub fn confirm_and_write<R: BufRead, W: Write>(
    elicitor: &mut Elicitor<R, W>,
    document: &ManifestDocument,
    path: &Path,
) -> Result<InitOutcome, InitError> {
    elicitor.say("")?;
    elicitor.say(&fill(messages::CONFIRM_HEADER, path.display()))?;
    elicitor.say(&document.preview())?;

    if !elicitor.confirm(messages::CONFIRM_PROMPT, messages::CONFIRM_DEFAULT)? {
        elicitor.say(messages::ABORTED)?;
        return Ok(InitOutcome::Aborted);
    }

    write_to_path(document, path)?;
    elicitor.say(&fill(messages::COMPLETE, path.display()))?;
    Ok(InitOutcome::Written(path.to_path_buf()))
}

/// Name of the folder the manifest goes into
fn default_package_name(path: &Path) -> String {
    target_folder(path)
        .canonicalize()
        .ok()
        .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| FALLBACK_PACKAGE_NAME.to_string())
}

fn os_user_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;
    use umbpack_manifest::{LicenceEntry, RegistryError};

    struct GithubLike;

    impl LicenceRegistry for GithubLike {
        fn fetch_licences(&self) -> Result<Vec<LicenceEntry>, RegistryError> {
            Ok(vec![LicenceEntry {
                spdx_id: Some("MIT".to_string()),
                url: Some("https://opensource.org/licenses/MIT".to_string()),
            }])
        }
    }

    struct Offline;

    impl LicenceRegistry for Offline {
        fn fetch_licences(&self) -> Result<Vec<LicenceEntry>, RegistryError> {
            Err(RegistryError::Transport("dns error".to_string()))
        }
    }

    type ScriptedElicitor = Elicitor<Cursor<Vec<u8>>, Vec<u8>>;

    fn elicitor(script: &str) -> ScriptedElicitor {
        Elicitor::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn context(folder: &Path) -> InitContext {
        InitContext {
            folder: Some(folder.to_string_lossy().to_string()),
            default_author: "alice".to_string(),
            config: Config::default(),
        }
    }

    // Name, Description, Version, Url, Umbraco version, Author, Website, Licence, confirm
    const SCRIPT_YES: &str = "MyPkg\n\n1.2.3\n\n8.0.0\nalice\n\nMIT\ny\n";
    const SCRIPT_NO: &str = "MyPkg\n\n1.2.3\n\n8.0.0\nalice\n\nMIT\nn\n";

    #[test]
    fn test_confirmed_write() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let mut e = elicitor(SCRIPT_YES);
        let resolver = LicenceResolver::new(GithubLike);

        let result = run_init(&context(temp_dir.path()), &resolver, &mut e);
        let expected = temp_dir.path().join("package.xml");
        assert_eq!(exit_code(&result), EXIT_WRITTEN);
        assert!(matches!(&result, Ok(InitOutcome::Written(p)) if *p == expected));

        let xml = fs::read_to_string(&expected).unwrap_or_default();
        assert!(xml.contains("<name>MyPkg</name>"));
        assert!(xml.contains("<version>1.2.3</version>"));
        assert!(xml.contains("<licence url=\"https://opensource.org/licenses/MIT\">MIT</licence>"));
        assert!(xml.contains("<major>8</major>"));
        assert!(xml.contains("<minor>0</minor>"));
        assert!(xml.contains("<patch>0</patch>"));
        assert!(xml.contains("<name>alice</name>"));

        let out = String::from_utf8(e.into_output()).unwrap_or_default();
        assert!(out.contains("About to write to"));
        assert!(out.contains("<info>"));
    }

    #[test]
    fn test_declined_write() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let mut e = elicitor(SCRIPT_NO);
        let resolver = LicenceResolver::new(GithubLike);

        let result = run_init(&context(temp_dir.path()), &resolver, &mut e);
        assert_eq!(result.as_ref().ok(), Some(&InitOutcome::Aborted));
        assert_eq!(exit_code(&result), EXIT_ABORTED);
        assert!(!temp_dir.path().join("package.xml").exists());
    }

    #[test]
    fn test_missing_folder_before_prompts() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let mut e = elicitor(SCRIPT_YES);
        let resolver = LicenceResolver::new(GithubLike);

        let result = run_init(&context(&temp_dir.path().join("missing")), &resolver, &mut e);
        assert_eq!(exit_code(&result), EXIT_MISSING_FOLDER);
        assert!(e.into_output().is_empty(), "no prompt should be shown");
    }

    #[test]
    fn test_website_defaults_to_url() {
        let mut e = elicitor("Pkg\n\n1.0.0\nhttps://example.com\n8.1.0\n\n\nUNLICENSED\n");
        let defaults = SetupDefaults {
            name: "folder".to_string(),
            version: "1.0.0".to_string(),
            umbraco_version: "8.0.0".to_string(),
            author: "bob".to_string(),
            licence: "MIT".to_string(),
        };
        let setup = gather_setup(&mut e, &defaults, &LicenceResolver::new(Offline));
        let Ok(setup) = setup else {
            panic!("setup should complete");
        };
        assert_eq!(setup.url, "https://example.com");
        assert_eq!(setup.website, "https://example.com");
        assert_eq!(setup.author, "bob");
        assert_eq!(setup.licence.name, "UNLICENSED");
        assert_eq!(setup.licence.url, "");

        let out = String::from_utf8(e.into_output()).unwrap_or_default();
        assert!(out.contains("Website: (https://example.com) "));
        assert!(!out.contains("Unable to retrieve"));
    }

    #[test]
    fn test_defaults_fill_everything() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let folder = temp_dir.path().join("MyFolder");
        assert!(fs::create_dir(&folder).is_ok());

        let mut e = elicitor("");
        let result = run_init(&context(&folder), &LicenceResolver::new(Offline), &mut e);
        assert!(matches!(result, Ok(InitOutcome::Written(_))));

        let xml = fs::read_to_string(folder.join("package.xml")).unwrap_or_default();
        assert!(xml.contains("<name>MyFolder</name>"));
        assert!(xml.contains("<version>1.0.0</version>"));
        assert!(xml.contains("<licence url=\"https://opensource.org/licenses/MIT\">MIT</licence>"));

        let out = String::from_utf8(e.into_output()).unwrap_or_default();
        assert!(out.contains("Unable to retrieve a list of licences"));
    }

    #[test]
    fn test_input_closed_is_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let mut ctx = context(temp_dir.path());
        ctx.config.default_licence = Some("GPL-3.0".to_string());

        let mut e = elicitor("");
        let result = run_init(&ctx, &LicenceResolver::new(Offline), &mut e);
        assert!(matches!(&result, Err(InitError::InputClosed(p)) if p == "Licence"));
        assert_eq!(exit_code(&result), EXIT_ABORTED);
        assert!(!temp_dir.path().join("package.xml").exists());
    }

    #[test]
    fn test_default_package_name() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let folder = temp_dir.path().join("Our.Umbraco.Thing");
        assert!(fs::create_dir(&folder).is_ok());
        assert_eq!(
            default_package_name(&folder.join("package.xml")),
            "Our.Umbraco.Thing"
        );
    }
}
