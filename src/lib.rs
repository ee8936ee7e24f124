#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub,
    clippy::dbg_macro
)]

use std::marker::PhantomData;

use bevy_app::{PluginGroup, PluginGroupBuilder};
use safeboard_scoreboard::{ScoreboardHost, ScoreboardPlugin};

#[cfg(feature = "testing")]
pub mod testing;


#[cfg(feature = "log")]
pub use bevy_log as log;
pub use safeboard_scoreboard as scoreboard;
pub use safeboard_text as text;

/// Contains the most frequently used items.
///
/// This is usually glob imported like so:
///
/// ```
/// use safeboard::prelude::*;
///
/// let objective = Objective::new("kills", "Kills").with_display_slot(DisplaySlot::Sidebar);
/// assert_eq!(objective.name(), "kills");
/// ```
pub mod prelude {
    pub use bevy_app::prelude::*;
    pub use bevy_ecs; // Needed for bevy_ecs macros to function correctly.
    pub use bevy_ecs::prelude::*;
    pub use safeboard_scoreboard::{
        AntiOverrideSettings, DisplayObjectiveObserved, DisplaySlot, HealthDisplay,
        MembershipAuthority, NumberFormat, Objective, ObjectiveObserved, Origin, SafeScoreboard,
        Score, ScoreboardError, ScoreboardHost, ScoreboardOp, ScoreboardPlugin, Team,
        TeamActionKind, TeamOptions,
    };
    pub use safeboard_text::{
        Color, Component as TextComponent, DecorationMask, IntoText, NamedColor, ProtocolVersion,
        RgbColor, StructuredComponent, Text, TextStyle,
    };

    pub use super::DefaultPlugins;
}

/// Adds [`ScoreboardPlugin<H>`] and, with the `log` feature, bevy's
/// `LogPlugin`.
pub struct DefaultPlugins<H>(PhantomData<fn() -> H>);

impl<H> Default for DefaultPlugins<H> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<H> PluginGroup for DefaultPlugins<H>
where
    H: ScoreboardHost + Send + Sync + 'static,
    H::Objective: Send + Sync + 'static,
    H::Team: Send + Sync + 'static,
{
    fn build(self) -> PluginGroupBuilder {
        #[allow(unused_mut)]
        let mut group =
            PluginGroupBuilder::start::<Self>().add(ScoreboardPlugin::<H>::default());

        #[cfg(feature = "log")]
        {
            group = group.add(bevy_log::LogPlugin::default());
        }

        group
    }
}
