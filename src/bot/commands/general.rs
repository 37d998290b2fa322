//! General Discord commands - ping, roll, and serverinfo.
//! These commands never touch the network probe (dice rolls are local and
//! `serverinfo` only echoes configuration).

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::dice::DiceRoll,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Rolls dice in NdM format, e.g. `2d6`.
    ///
    /// A malformed expression gets a usage reply, never an error; a valid one
    /// gets the individual values and their total.
    #[poise::command(slash_command, prefix_command)]
    pub async fn roll(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Dice expression, e.g. 2d6"] dice: String,
    ) -> Result<()> {
        let Ok(roll) = dice.parse::<DiceRoll>() else {
            ctx.say("Format has to be NdM, e.g. 2d6").await?;
            return Ok(());
        };

        let outcome = roll.roll();
        ctx.say(format!(
            "🎲 You rolled: {:?} → Total: {}",
            outcome.values, outcome.total
        ))
        .await?;
        Ok(())
    }

    /// Shows the configured server address. No network call involved.
    #[poise::command(slash_command, prefix_command)]
    pub async fn serverinfo(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let config = &ctx.data().config;
        ctx.say(format!(
            "🖥️ Watched server: `{}:{}`",
            config.host, config.game_port
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
