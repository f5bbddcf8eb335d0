/// File whose coverage is gated when no target is given
pub const DEFAULT_TARGET: &str = "phonebook.h";
/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG: &str = "covgate.toml";
