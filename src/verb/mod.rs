//! The catalog of call-control verbs a flow node can perform.
//!
//! The table is fixed at compile time. Every verb carries a structural [`Role`]
//! that the flow graph uses to decide which connections are legal.

use crate::error::FlowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod params;

pub use params::{Params, VerbParams};

/// Structural role of a verb inside a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Where a call starts. Exactly one per valid flow, no incoming edges.
    Entry,
    /// Ends the call. No outgoing edges.
    Terminal,
    /// Continues on `success`, `failure` or an unconditional `default` branch.
    Branching,
}

/// Master macro for the verb table: the enum, its wire names, roles and palette labels.
macro_rules! define_verbs {
    ( $( ($variant:ident, $name:literal, $role:ident, $label:literal) ),* $(,)? ) => {
        /// A call-control action performed by a flow node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Verb {
            $(
                #[serde(rename = $name)]
                $variant,
            )*
        }

        impl Verb {
            /// Every known verb, in palette order.
            pub const ALL: &'static [Verb] = &[ $( Verb::$variant, )* ];

            /// The identifier used in flow documents (e.g. `"playDtmf"`).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Verb::$variant => $name, )*
                }
            }

            pub fn role(&self) -> Role {
                match self {
                    $( Verb::$variant => Role::$role, )*
                }
            }

            /// Human-facing name shown in the verb palette.
            pub fn display_name(&self) -> &'static str {
                match self {
                    $( Verb::$variant => $label, )*
                }
            }
        }

        impl FromStr for Verb {
            type Err = FlowError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(Verb::$variant), )*
                    other => Err(FlowError::UnknownVerb(other.to_string())),
                }
            }
        }
    };
}

define_verbs! {
    (Accept, "accept", Entry, "Accept"),
    (Hangup, "hangup", Terminal, "Hangup"),
    (Play, "play", Branching, "Play Audio"),
    (PlayDtmf, "playDtmf", Branching, "Play DTMF"),
    (Say, "say", Branching, "Say (TTS)"),
    (Gather, "gather", Branching, "Gather Input"),
    (Dial, "dial", Branching, "Dial/Bridge"),
    (Record, "record", Branching, "Record"),
    (Mute, "mute", Branching, "Mute"),
    (Unmute, "unmute", Branching, "Unmute"),
}

impl Verb {
    /// Default node label for a freshly placed node: the verb id upper-cased.
    pub fn default_label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up the structural role of a verb by its document identifier.
pub fn role_of(verb: &str) -> Result<Role, FlowError> {
    verb.parse::<Verb>().map(|v| v.role())
}

/// Returns `true` if `verb` names a verb in the catalog. Matching is case-sensitive.
pub fn is_known(verb: &str) -> bool {
    verb.parse::<Verb>().is_ok()
}
