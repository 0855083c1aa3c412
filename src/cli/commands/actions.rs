//! Actions command implementation
//!
//! Lists the available export actions.

use crate::core::export::ExportAction;
use clap::Args;

/// Arguments for the actions command
#[derive(Args, Debug)]
pub struct ActionsArgs {}

impl ActionsArgs {
    /// Execute the actions command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        println!("{}", Self::render());
        Ok(0)
    }

    fn render() -> String {
        ExportAction::ALL
            .iter()
            .map(|a| format!("  {:<12} {}", a.name(), a.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_action() {
        let text = ActionsArgs::render();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("jsonattach   JSON with attachments"));
    }
}
