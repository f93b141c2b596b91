use std::sync::Weak;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::Portal;

/// Re-run `Portal::refresh` on a fixed interval from a background thread.
/// The loop holds only a weak handle and exits once the portal is dropped.
/// Overlap with externally triggered refreshes is handled by the portal's
/// refresh gate, not here.
pub fn start_refresh_loop(portal: Weak<Portal>, every: Duration) -> JoinHandle<()> {
    thread::spawn(move || loop {
        thread::sleep(every);
        match portal.upgrade() {
            Some(portal) => {
                portal.refresh();
            }
            None => break,
        }
    })
}
