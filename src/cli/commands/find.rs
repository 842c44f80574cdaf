//! Find command - look up a cached esbuild directory

use crate::cli::args::FindArgs;
use crate::config::{Config, ConfigManager};
use crate::error::{SetupError, SetupResult};
use crate::installer::TOOL_NAME;
use crate::platform::Platform;
use crate::toolcache::{CacheKey, DirToolCache, ToolCache};

/// Execute the find command
///
/// Prints only the directory so the output can be used in scripts.
pub async fn execute(args: FindArgs, config: &Config) -> SetupResult<()> {
    let root = args
        .cache_dir
        .unwrap_or_else(|| ConfigManager::tool_cache_dir(config));
    let arch = args.arch.unwrap_or_else(|| Platform::detect().arch);
    let cache = DirToolCache::new(root);

    let key = CacheKey {
        tool: TOOL_NAME,
        version: &args.version,
        arch: &arch,
    };

    let found = cache.find(&key).await?;
    match found {
        Some(dir) => {
            println!("{}", dir.display());
            Ok(())
        }
        None => Err(SetupError::NotCached {
            version: args.version,
            arch,
        }),
    }
}
