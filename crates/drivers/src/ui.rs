use std::time::Duration;

use filter_studio_adapters::present_session_title;
use filter_studio_application::{
    ApplicationError, ApplyPresetCommand, DownloadCommand, EditingSession, EditorService,
    PollImageCommand, ResetCommand, SaveCommand, SetParameterCommand, ShowParameterQuery,
    SubmitImageCommand,
};
use filter_studio_domain::{Bitmap, ParameterName, Unit, PRESETS};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

const WINDOW_WIDTH: usize = 960;
const WINDOW_HEIGHT: usize = 640;
const BACKGROUND: u32 = 0x222222;

const PRESET_KEYS: [Key; 10] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
    Key::Key0,
];

/// Opens the editor window. The image is decoded in the background and shows up once ready.
pub fn launch_viewer(
    service: &EditorService,
    session: &mut EditingSession,
    image_bytes: Vec<u8>,
) -> Result<(), String> {
    let mut window = Window::new(
        &present_session_title(session, ParameterName::ALL[0]),
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        WindowOptions::default(),
    )
    .map_err(|error| format!("failed to start UI window: {error}"))?;
    window.limit_update_rate(Some(Duration::from_micros(16_000)));

    service
        .submit_image(SubmitImageCommand { bytes: image_bytes })
        .map_err(|error| format!("image submit failed: {error}"))?;

    let mut buffer = vec![BACKGROUND; WINDOW_WIDTH * WINDOW_HEIGHT];
    let mut selected = 0_usize;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        match service.poll_image(session, PollImageCommand) {
            Ok(Some((width, height))) => log::info!("image ready ({width}x{height})"),
            Ok(None) => {}
            Err(error) => log::error!("could not open image: {error}"),
        }

        for (key, preset) in PRESET_KEYS.iter().zip(PRESETS.iter()) {
            if window.is_key_pressed(*key, KeyRepeat::No) {
                let command = ApplyPresetCommand {
                    name: preset.name.to_string(),
                };
                if let Err(error) = service.apply_preset(session, command) {
                    log::warn!("preset {} failed: {error}", preset.name);
                }
            }
        }

        let count = ParameterName::ALL.len();
        if window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
            selected = (selected + 1) % count;
        }
        if window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
            selected = (selected + count - 1) % count;
        }

        let name = ParameterName::ALL[selected];
        let nudge = if window.is_key_pressed(Key::Right, KeyRepeat::Yes) {
            1.0
        } else if window.is_key_pressed(Key::Left, KeyRepeat::Yes) {
            -1.0
        } else {
            0.0
        };
        if nudge != 0.0 {
            if let Err(error) = nudge_parameter(service, session, name, nudge) {
                log::warn!("could not change {name}: {error}");
            }
        }

        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            service.reset(session, ResetCommand);
        }
        if window.is_key_pressed(Key::D, KeyRepeat::No) {
            if let Err(error) = service.download(session, DownloadCommand) {
                log::warn!("download failed: {error}");
            }
        }
        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            if let Err(error) = service.save(session, SaveCommand) {
                log::warn!("save failed: {error}");
            }
        }

        draw_fitted(
            session.surface().content(),
            &mut buffer,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
        );
        window.set_title(&present_session_title(session, name));
        window
            .update_with_buffer(&buffer, WINDOW_WIDTH, WINDOW_HEIGHT)
            .map_err(|error| format!("failed to update UI window: {error}"))?;
    }

    Ok(())
}

/// Moves `name` one step in the direction of `nudge`; the service clamps at the bounds.
fn nudge_parameter(
    service: &EditorService,
    session: &mut EditingSession,
    name: ParameterName,
    nudge: f32,
) -> Result<f32, ApplicationError> {
    let current = service.show_parameter(
        session,
        ShowParameterQuery {
            name: name.as_str().to_string(),
        },
    )?;
    service.set_parameter(
        session,
        SetParameterCommand {
            name: name.as_str().to_string(),
            value: current.value + nudge * step_for(current.unit),
        },
    )
}

fn step_for(unit: Unit) -> f32 {
    match unit {
        Unit::Pixels => 1.0,
        Unit::Percent | Unit::Degrees => 5.0,
    }
}

/// Scales `frame` to fit the buffer with nearest-neighbour sampling and centers it. Pixels are
/// blended over the background by their alpha.
fn draw_fitted(frame: Option<&Bitmap>, buffer: &mut [u32], width: usize, height: usize) {
    buffer.fill(BACKGROUND);
    let Some(frame) = frame else {
        return;
    };

    let src_width = frame.width() as usize;
    let src_height = frame.height() as usize;
    let scale = (width as f32 / src_width as f32).min(height as f32 / src_height as f32);
    let dst_width = ((src_width as f32 * scale).round() as usize).clamp(1, width);
    let dst_height = ((src_height as f32 * scale).round() as usize).clamp(1, height);
    let left = (width - dst_width) / 2;
    let top = (height - dst_height) / 2;

    for y in 0..dst_height {
        let src_y = y * src_height / dst_height;
        for x in 0..dst_width {
            let src_x = x * src_width / dst_width;
            if let Some(rgba) = frame.pixel(src_x as u32, src_y as u32) {
                buffer[(top + y) * width + left + x] = blend_over_background(rgba);
            }
        }
    }
}

fn blend_over_background([r, g, b, a]: [u8; 4]) -> u32 {
    let alpha = u32::from(a);
    let mix = |channel: u8, shift: u32| {
        let back = (BACKGROUND >> shift) & 0xFF;
        (u32::from(channel) * alpha + back * (255 - alpha) + 127) / 255
    };
    (mix(r, 16) << 16) | (mix(g, 8) << 8) | mix(b, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_studio_adapters::{
        BackgroundDecodeQueue, CpuFilterRenderer, FsExportSink, ImageCrateDecoder,
        PngImageEncoder, SqliteGalleryStore, SystemClock,
    };
    use filter_studio_application::{ImageEncoder, LoadImageCommand};

    fn editing_session() -> (EditorService, EditingSession) {
        let service = EditorService::new(
            Box::new(ImageCrateDecoder),
            Box::new(BackgroundDecodeQueue::new()),
            Box::new(CpuFilterRenderer),
            Box::new(PngImageEncoder),
            Box::new(SqliteGalleryStore::new("unused.sqlite3".to_string())),
            Box::new(FsExportSink::new(".".to_string())),
            Box::new(SystemClock),
        );
        let bytes = PngImageEncoder
            .encode_png(&Bitmap::filled(3, 2, [90, 60, 30, 255]).expect("bitmap"))
            .expect("encode");
        let mut session = EditingSession::new();
        service
            .load_image(&mut session, LoadImageCommand { bytes })
            .expect("load");
        (service, session)
    }

    #[test]
    fn nudges_step_by_unit_and_stop_at_bounds() {
        let (service, mut session) = editing_session();

        let blur = nudge_parameter(&service, &mut session, ParameterName::Blur, 1.0);
        assert_eq!(blur.expect("nudge"), 1.0);
        let brightness = nudge_parameter(&service, &mut session, ParameterName::Brightness, -1.0);
        assert_eq!(brightness.expect("nudge"), 95.0);
        let hue = nudge_parameter(&service, &mut session, ParameterName::HueRotation, -1.0);
        assert_eq!(hue.expect("nudge"), 0.0);
        assert_eq!(session.filters().get(ParameterName::Blur).value, 1.0);
    }

    #[test]
    fn empty_frame_leaves_background() {
        let mut buffer = vec![0_u32; 6];
        draw_fitted(None, &mut buffer, 3, 2);
        assert!(buffer.iter().all(|pixel| *pixel == BACKGROUND));
    }

    #[test]
    fn wide_image_is_letterboxed_and_centered() {
        let frame = Bitmap::filled(4, 1, [255, 0, 0, 255]).expect("bitmap");
        let mut buffer = vec![0_u32; 4 * 4];
        draw_fitted(Some(&frame), &mut buffer, 4, 4);

        // 4x1 scales to 4x1 and lands on row 1 (of rows 0..4).
        assert!(buffer[..4].iter().all(|pixel| *pixel == BACKGROUND));
        assert!(buffer[4..8].iter().all(|pixel| *pixel == 0xFF0000));
        assert!(buffer[8..].iter().all(|pixel| *pixel == BACKGROUND));
    }

    #[test]
    fn small_image_is_scaled_up() {
        let frame = Bitmap::filled(1, 1, [0, 0, 255, 255]).expect("bitmap");
        let mut buffer = vec![0_u32; 9];
        draw_fitted(Some(&frame), &mut buffer, 3, 3);
        assert!(buffer.iter().all(|pixel| *pixel == 0x0000FF));
    }

    #[test]
    fn transparent_pixels_show_background() {
        assert_eq!(blend_over_background([255, 255, 255, 0]), BACKGROUND);
        assert_eq!(blend_over_background([10, 20, 30, 255]), 0x0A141E);
    }

    #[test]
    fn steps_follow_units() {
        assert_eq!(step_for(Unit::Pixels), 1.0);
        assert_eq!(step_for(Unit::Percent), 5.0);
        assert_eq!(step_for(Unit::Degrees), 5.0);
    }
}
