/// Registration of global remote-control entry points (window functions, key listeners).
///
/// Installed when the controller attaches and uninstalled when it is disposed; triggers are
/// only accepted in between.
pub trait RemoteHooks {
    fn install(&mut self, controller: &str);
    fn uninstall(&mut self, controller: &str);
}

/// Hooks for hosts that deliver triggers straight to the controller. Only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectHooks;

impl RemoteHooks for DirectHooks {
    fn install(&mut self, controller: &str) {
        tracing::debug!(controller, "remote hooks installed");
    }

    fn uninstall(&mut self, controller: &str) {
        tracing::debug!(controller, "remote hooks removed");
    }
}
