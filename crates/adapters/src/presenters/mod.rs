use filter_studio_application::{EditingSession, SessionState};
use filter_studio_domain::{FilterParameter, GalleryEntry, ParameterName, Preset};

pub fn present_parameter_row(param: &FilterParameter) -> String {
    format!(
        "{}\t{}\t[{}, {}]",
        param.name, param, param.min, param.max
    )
}

pub fn present_preset_row(preset: &Preset) -> String {
    let values: Vec<String> = preset
        .values
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    format!("{}\t{}", preset.name, values.join(" "))
}

pub fn present_gallery_row(index: usize, entry: &GalleryEntry) -> String {
    format!(
        "{}\t{}\t{} bytes\t{}",
        index + 1,
        entry.saved_at.as_deref().unwrap_or("-"),
        entry.rendered_image.len(),
        entry.filters.composition()
    )
}

pub fn present_session_title(session: &EditingSession, selected: ParameterName) -> String {
    match session.state() {
        SessionState::Empty => "filter-studio | no image loaded".to_string(),
        SessionState::Editing => {
            let surface = session.surface();
            format!(
                "filter-studio | {}x{} | {} = {} | {}",
                surface.width(),
                surface.height(),
                selected,
                session.filters().get(selected),
                session.filters().composition()
            )
        }
    }
}
