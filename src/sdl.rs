use crate::errors::*;

pub struct SdlSetup {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
}

/// The driver only draws into a window, so video is the only subsystem started.
pub fn init() -> Result<SdlSetup> {
    // SDL reports failures as plain strings.
    let sdl_context = sdl2::init().map_err(|e| format!("Failed to initialise SDL: {}", e))?;
    let video_subsystem = sdl_context.video()
                                     .map_err(|e| format!("Failed to initialise SDL video: {}", e))?;

    Ok(SdlSetup {
        sdl_context,
        video_subsystem,
    })
}
