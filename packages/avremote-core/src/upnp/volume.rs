//! Master volume and mute via RenderingControl.

use reqwest::Client;

use crate::protocol_constants::MASTER_CHANNEL;
use crate::upnp::services::UpnpService;
use crate::upnp::soap::{SoapRequestBuilder, SoapResult};
use crate::upnp::types::DeviceEndpoint;

/// `DesiredMute` argument value for a mute flag.
fn mute_arg(mute: bool) -> &'static str {
    if mute {
        "1"
    } else {
        "0"
    }
}

/// Sets the master volume.
///
/// The level is sent as-is; range checking is the caller's job and the
/// device is trusted to reject or clamp anything else.
///
/// # Arguments
/// * `client` - The HTTP client to use for the request
/// * `endpoint` - The receiver to command
/// * `level` - Desired volume (0-100 expected)
pub async fn set_volume(client: &Client, endpoint: &DeviceEndpoint, level: u8) -> SoapResult<()> {
    log::debug!("[RC] SetVolume: {}", level);
    SoapRequestBuilder::new(client, endpoint)
        .service(UpnpService::RenderingControl)
        .action("SetVolume")
        .instance_id()
        .arg("Channel", MASTER_CHANNEL)
        .arg("DesiredVolume", level.to_string())
        .send()
        .await?;
    Ok(())
}

/// Sets the master mute flag.
///
/// # Arguments
/// * `client` - The HTTP client to use for the request
/// * `endpoint` - The receiver to command
/// * `mute` - `true` to mute, `false` to unmute
pub async fn set_mute(client: &Client, endpoint: &DeviceEndpoint, mute: bool) -> SoapResult<()> {
    log::debug!("[RC] SetMute: {}", mute);
    SoapRequestBuilder::new(client, endpoint)
        .service(UpnpService::RenderingControl)
        .action("SetMute")
        .instance_id()
        .arg("Channel", MASTER_CHANNEL)
        .arg("DesiredMute", mute_arg(mute))
        .send()
        .await?;
    Ok(())
}
