//! Plain-text dump of a command list, in the format used by the regression
//! fixtures.
//!
//! ```text
//! commands_count=1
//! cmd[0]: id=1072715681 type=1 bbox={x=0.000000,y=0.000000,w=200.000000,h=100.000000}
//! ```

use std::fmt::Write;

use crate::commands::RenderCommand;

/// Format every command on its own line, preceded by the command count.
pub fn format_commands(commands: &[RenderCommand]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "commands_count={}", commands.len());
    for (i, command) in commands.iter().enumerate() {
        let _ = writeln!(out, "cmd[{}]: {}", i, format_command(command));
    }
    out
}

/// One command without its index.
pub fn format_command(command: &RenderCommand) -> String {
    let bbox = &command.bounding_box;
    format!(
        "id={} type={} bbox={{x={:.6},y={:.6},w={:.6},h={:.6}}}",
        command.id,
        command.command_type.tag(),
        bbox.x,
        bbox.y,
        bbox.width,
        bbox.height
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit_commands;
    use llay_core::{
        BorderConfig, BorderWidth, Color, ElementDeclaration, Padding, Sizing, TextConfig,
    };
    use llay_layout::{LayoutContext, MonospaceMeasure};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_commands(&[]), "commands_count=0\n");
    }

    #[test]
    fn test_golden_dump() {
        let mut ctx = LayoutContext::default().with_measure_text(MonospaceMeasure::default());
        ctx.begin_frame().unwrap();
        ctx.open(
            ElementDeclaration::new()
                .with_id("outer")
                .with_sizing(Sizing::fixed(200.0, 100.0))
                .with_padding(Padding::all(10))
                .with_background(Color::WHITE)
                .with_border(BorderConfig::new(BorderWidth::all(1), Color::BLACK)),
        )
        .unwrap();
        ctx.text("Hi", TextConfig::default()).unwrap();
        ctx.close().unwrap();
        let commands = emit_commands(ctx.end_frame().unwrap());

        insta::assert_snapshot!(format_commands(&commands), @r"
        commands_count=3
        cmd[0]: id=1072715681 type=1 bbox={x=0.000000,y=0.000000,w=200.000000,h=100.000000}
        cmd[1]: id=1072715681 type=2 bbox={x=0.000000,y=0.000000,w=200.000000,h=100.000000}
        cmd[2]: id=1539874901 type=3 bbox={x=10.000000,y=10.000000,w=20.000000,h=20.000000}
        ");
    }
}
