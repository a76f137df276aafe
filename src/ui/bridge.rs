//! Reads the host page: Telegram WebApp bridge, browser locale, origin.

use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::auth::PlatformContext;

const PLATFORM_JS: &str = r#"
const tg = window.Telegram && window.Telegram.WebApp;
if (tg && typeof tg.ready === "function") {
  tg.ready();
}
const user = tg && tg.initDataUnsafe && tg.initDataUnsafe.user;
return {
  init_data: (tg && tg.initData) || null,
  platform: (tg && tg.platform) || null,
  language_code: (user && user.language_code) || null,
  browser_locale: navigator.language || null,
  origin: window.location.origin || "",
};
"#;

/// Snapshot the bridge. Outside the chat client this is an empty context
/// with only the browser hints filled in.
pub async fn read_platform() -> PlatformContext {
    match eval(PLATFORM_JS).join().await {
        Ok(value) => match serde_json::from_value::<PlatformContext>(value) {
            Ok(ctx) => {
                debug!(
                    bridge = ctx.init_data.is_some(),
                    platform = ?ctx.platform,
                    locale = ?ctx.browser_locale,
                    "platform context read"
                );
                ctx
            }
            Err(e) => {
                warn!(error = %e, "unexpected platform context shape");
                PlatformContext::default()
            }
        },
        Err(e) => {
            warn!(error = ?e, "platform context unavailable");
            PlatformContext::default()
        }
    }
}
