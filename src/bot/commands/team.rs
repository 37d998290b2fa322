//! Team role self-assignment - `jointeam`.
//!
//! Roles follow the `Team <n>` naming convention. Joining a team sheds every
//! other role matching the convention first, so a member is on at most one
//! team at a time.

/// Role name for a given team number.
pub(crate) fn team_role_name(number: u32) -> String {
    format!("Team {number}")
}

/// Parses a role name following the `Team <n>` convention.
/// Returns the team number, or `None` for any other role name.
pub(crate) fn parse_team_role(name: &str) -> Option<u32> {
    name.strip_prefix("Team ")?.parse().ok()
}

/// Validates a requested team number against the configured upper bound.
/// Checked before any role is looked up or mutated.
pub(crate) fn team_number_in_range(number: u32, max: u32) -> bool {
    (1..=max).contains(&number)
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{parse_team_role, team_number_in_range, team_role_name};
    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Joins a numbered team by swapping `Team <n>` roles.
    ///
    /// The number is validated against the configured range before any role
    /// is touched; a missing role is reported distinctly from success.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn jointeam(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Team number"] number: u32,
    ) -> Result<()> {
        let max = ctx.data().config.team_role_max;
        if !team_number_in_range(number, max) {
            ctx.say(format!("❌ Team number must be between 1 and {max}."))
                .await?;
            return Ok(());
        }

        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command only works in a server.").await?;
            return Ok(());
        };

        let wanted = team_role_name(number);
        let roles = guild_id.roles(ctx.http()).await?;
        let Some(target) = roles.values().find(|role| role.name == wanted).map(|role| role.id)
        else {
            ctx.say(format!("❌ Role '{wanted}' does not exist on this server."))
                .await?;
            return Ok(());
        };

        let Some(member) = ctx.author_member().await else {
            ctx.say("Could not resolve your server membership.").await?;
            return Ok(());
        };

        // Shed every other Team <k> role before granting the new one.
        for role_id in member.roles.iter().copied() {
            let held_team = roles
                .get(&role_id)
                .is_some_and(|role| parse_team_role(&role.name).is_some());
            if held_team && role_id != target {
                ctx.http()
                    .remove_member_role(guild_id, member.user.id, role_id, Some("left team"))
                    .await?;
            }
        }

        if !member.roles.contains(&target) {
            ctx.http()
                .add_member_role(guild_id, member.user.id, target, Some("joined team"))
                .await?;
        }

        ctx.say(format!("✅ You are now on {wanted}!")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_role_name_follows_convention() {
        assert_eq!(team_role_name(3), "Team 3");
        assert_eq!(team_role_name(10), "Team 10");
    }

    #[test]
    fn test_parse_team_role_roundtrip() {
        assert_eq!(parse_team_role("Team 3"), Some(3));
        assert_eq!(parse_team_role("Team 10"), Some(10));
    }

    #[test]
    fn test_parse_team_role_rejects_other_roles() {
        assert_eq!(parse_team_role("Moderator"), None);
        assert_eq!(parse_team_role("Team"), None);
        assert_eq!(parse_team_role("Team x"), None);
        assert_eq!(parse_team_role("team 3"), None);
    }

    #[test]
    fn test_team_number_bounds() {
        assert!(!team_number_in_range(0, 10));
        assert!(!team_number_in_range(11, 10));
        assert!(team_number_in_range(1, 10));
        assert!(team_number_in_range(3, 10));
        assert!(team_number_in_range(10, 10));
    }
}
