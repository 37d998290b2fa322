//! Owner-only administration - `shutdown`.
//!
//! The one intentionally fatal path in the bot: an authenticated immediate
//! process exit, with no cleanup beyond what stderr logging flushes itself.

use crate::errors::Error;

/// Checks whether `author` is the configured privileged identity.
/// With no owner configured, shutdown is denied for everyone.
pub(crate) fn authorize_shutdown(author: u64, owner: Option<u64>) -> Result<(), Error> {
    match owner {
        Some(owner_id) if owner_id == author => Ok(()),
        _ => Err(Error::PermissionDenied(
            "only the configured owner may shut the bot down".to_string(),
        )),
    }
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::authorize_shutdown;
    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };
    use tracing::info;

    /// Terminates the bot process. Owner only.
    #[poise::command(slash_command, prefix_command)]
    pub async fn shutdown(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let author = ctx.author();
        if authorize_shutdown(author.id.get(), ctx.data().config.owner_id).is_err() {
            ctx.say("⛔ You are not allowed to shut the bot down.").await?;
            return Ok(());
        }

        ctx.say("Shutting down!").await?;
        info!("Shutdown requested by {} ({})", author.name, author.id);

        ctx.serenity_context().shard.shutdown_clean();
        std::process::exit(0);
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_owner_is_denied() {
        assert!(authorize_shutdown(42, Some(7)).is_err());
    }

    #[test]
    fn test_owner_is_allowed() {
        assert!(authorize_shutdown(7, Some(7)).is_ok());
    }

    #[test]
    fn test_missing_owner_denies_everyone() {
        assert!(authorize_shutdown(7, None).is_err());
    }
}
