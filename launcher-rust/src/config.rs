// Generated by build.rs from the repository's config.toml.
include!(concat!(env!("OUT_DIR"), "/launcher_config.rs"));
