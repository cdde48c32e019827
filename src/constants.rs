// Constants module for shared string constants

/// Config file HyperTerm reads from the user's home directory.
pub const CONFIG_FILE: &str = ".hyperterm.js";
pub const PLUGINS_FIELD: &str = "plugins";
pub const LOCAL_PLUGINS_FIELD: &str = "localPlugins";

/// Indentation added per nesting level when the plugin list is rewritten.
pub const INDENT: &str = "  ";
