//! The panel's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a segment event in the
//! report markup, a replayed script line or a programmatic call, is a
//! `PanelCommand`. Consumers construct commands and pass them to
//! [`Panel::execute`](super::Panel::execute).

use std::str::FromStr;

use crate::error::IrisError;
use crate::selection::ResidueAction;

/// A discrete operation the panel can perform.
///
/// ```ignore
/// panel.execute(PanelCommand::ToggleVersion, &mut target)?;
/// panel.execute(PanelCommand::SelectChain { chain: 1 }, &mut target)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Cycle to the next model version.
    ToggleVersion,
    /// Select a chain.
    SelectChain {
        /// Chain index.
        chain: usize,
    },
    /// A pointer event on a residue segment.
    Residue {
        /// Pointer phase.
        action: ResidueAction,
        /// Residue position under the pointer.
        residue: usize,
    },
    /// Re-read the residue-view geometry and remap every boxplot.
    Recalibrate,
}

impl FromStr for PanelCommand {
    type Err = IrisError;

    /// Parse a script line: `version`, `chain <c>`, `begin <r>`,
    /// `move <r>`, `end <r>`, `segment <code> <r>` or `recalibrate`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let mut arg = || -> Result<usize, IrisError> {
            words
                .next()
                .and_then(|w| w.parse().ok())
                .ok_or_else(|| IrisError::InvalidCommand(line.to_owned()))
        };

        let residue = |action, residue| Self::Residue { action, residue };
        let command = match verb {
            "version" => Self::ToggleVersion,
            "recalibrate" => Self::Recalibrate,
            "chain" => Self::SelectChain { chain: arg()? },
            "begin" => residue(ResidueAction::Begin, arg()?),
            "move" => residue(ResidueAction::Move, arg()?),
            "end" => residue(ResidueAction::End, arg()?),
            "segment" => {
                let code = u8::try_from(arg()?).ok();
                let action = code
                    .and_then(ResidueAction::from_code)
                    .ok_or_else(|| IrisError::InvalidCommand(line.to_owned()))?;
                residue(action, arg()?)
            }
            _ => return Err(IrisError::InvalidCommand(line.to_owned())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_script_lines() {
        assert_eq!(
            "version".parse::<PanelCommand>().unwrap(),
            PanelCommand::ToggleVersion
        );
        assert_eq!(
            "chain 3".parse::<PanelCommand>().unwrap(),
            PanelCommand::SelectChain { chain: 3 }
        );
        assert_eq!(
            "  move   12 ".parse::<PanelCommand>().unwrap(),
            PanelCommand::Residue {
                action: ResidueAction::Move,
                residue: 12
            }
        );
        assert_eq!(
            "segment 3 4".parse::<PanelCommand>().unwrap(),
            PanelCommand::Residue {
                action: ResidueAction::End,
                residue: 4
            }
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in ["", "chain", "chain x", "segment 7 1", "zoom 2"] {
            assert!(
                matches!(
                    line.parse::<PanelCommand>(),
                    Err(IrisError::InvalidCommand(_))
                ),
                "accepted {line:?}"
            );
        }
    }
}
