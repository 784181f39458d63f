//! Bookshelf application library
//!
//! Hosts the application modules and the bootstrap that runs them behind the HTTP server.

pub mod modules;

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Registry holding every application module
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Initialize and start modules, serve HTTP until shutdown, then stop modules.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = registry();
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_modules(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_modules(&ctx)
        .await
        .context("module start failed")?;

    let served = bookshelf_http::start_server(&registry, &settings).await;

    registry
        .stop_modules()
        .await
        .context("module shutdown failed")?;

    served
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_mounts_books_at_root_path() {
        let registry = registry();
        let books = registry.get_module("books").expect("books module registered");
        assert_eq!(books.mount_path(), "/books");
    }

    #[tokio::test]
    async fn books_module_lifecycle_runs_on_multithreaded_runtime() {
        let registry = registry();
        let settings = Settings::default();

        // Spawning requires the lifecycle futures to be Send.
        tokio::spawn(async move {
            let ctx = InitCtx {
                settings: &settings,
            };
            registry.init_modules(&ctx).await?;
            registry.start_modules(&ctx).await?;
            registry.stop_modules().await
        })
        .await
        .expect("lifecycle task")
        .expect("lifecycle succeeds");
    }
}
