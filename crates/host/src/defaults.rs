use crate::ctx::Ctx;
use crate::error::HostError;
use hearth_common::{KeyCode, Modifiers, Trigger};
use hearth_input::InputManager;

/// Register the built-in named actions every host carries. Plugins may
/// re-register any of these to replace the behavior; existing bindings
/// pick up the replacement.
pub fn register_actions(input: &mut InputManager<Ctx>) {
    input.register_action(
        "stop",
        Box::new(|ctx: &mut Ctx| {
            tracing::info!("stop requested via input");
            ctx.request_stop();
        }),
    );
    input.register_action(
        "toggle_cursor",
        Box::new(|ctx: &mut Ctx| {
            ctx.cursor.visible = !ctx.cursor.visible;
        }),
    );
    input.register_action(
        "save_world",
        Box::new(|ctx: &mut Ctx| match &ctx.world {
            Some(world) => {
                if let Err(e) = world.save() {
                    tracing::warn!(error = %e, "world save failed");
                }
            }
            None => tracing::warn!("save_world fired with no world loaded"),
        }),
    );
}

/// Bind the stock keys for the built-in actions. Shift+Escape stops the
/// host; Alt+C toggles cursor visibility. Plugins and keybind files may
/// rebind either.
pub fn bind_default_keys(input: &mut InputManager<Ctx>) -> Result<(), HostError> {
    input.bind_action(KeyCode::Escape, Modifiers::SHIFT, Trigger::Press, "stop")?;
    input.bind_action(KeyCode::C, Modifiers::ALT, Trigger::Press, "toggle_cursor")?;
    Ok(())
}
