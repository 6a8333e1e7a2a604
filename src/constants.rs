//! Common constants used throughout progen.

/// Environment variable naming the generator home directory.
pub const HOME_KEY: &str = "PROGEN_HOME";

/// Key holding the project directory generation targets.
pub const PROJECT_PATH_KEY: &str = "projectPath";

/// Key holding the parent of the project directory.
pub const PROJECTS_PATH_KEY: &str = "projectsPath";

/// Key re-published with the resolved template root.
pub const TEMPLATES_ROOT_KEY: &str = "dir_templates_root";

/// Keys that must resolve to non-blank values after merging.
pub const MANDATORY_KEYS: [&str; 2] = [HOME_KEY, PROJECT_PATH_KEY];

/// Comma-separated override for the ignore-name set.
pub const IGNORE_NAMES_KEY: &str = "generator_ignore_names";

/// Comma-separated override for the binary-extension set.
pub const BINARY_EXTENSIONS_KEY: &str = "generator_binary_extensions";

/// Home configuration file names, tried in order.
pub const HOME_CONFIG_FILES: [&str; 3] = ["gen.json", "gen.yml", "gen.yaml"];

/// Project-local configuration file names, tried in order.
pub const PROJECT_CONFIG_FILES: [&str; 3] =
    ["gen_config.json", "gen_config.yml", "gen_config.yaml"];

/// Directory under the home root holding templates.
pub const TEMPLATES_DIR: &str = "templates";

/// Per-template ignore file name.
pub const IGNORE_FILE: &str = ".progenignore";

/// Names never traversed, wherever they appear.
pub const DEFAULT_IGNORE_NAMES: [&str; 12] = [
    ".svn",
    "CVS",
    ".cvsignore",
    ".copyarea.db",
    "SCCS",
    "vssver.scc",
    ".DS_Store",
    ".git",
    ".settings",
    ".idea",
    ".vscode",
    ".myeclipse",
];

/// Extensions treated as binary content.
pub const DEFAULT_BINARY_EXTENSIONS: [&str; 10] =
    [".gif", ".jpg", ".woff", ".png", ".eot", ".svg", ".ttf", ".css", ".less", ".pdf"];
