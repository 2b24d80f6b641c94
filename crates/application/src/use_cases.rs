#[derive(Debug, Clone, Default)]
pub struct BootstrapGalleryCommand;

#[derive(Debug, Clone)]
pub struct LoadImageCommand {
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct SubmitImageCommand {
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct PollImageCommand;

#[derive(Debug, Clone)]
pub struct SetParameterCommand {
    pub name: String,
    pub value: f32,
}

#[derive(Debug, Clone)]
pub struct ShowParameterQuery {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ApplyPresetCommand {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ResetCommand;

#[derive(Debug, Clone, Default)]
pub struct SaveCommand;

#[derive(Debug, Clone, Default)]
pub struct ExportCommand;

#[derive(Debug, Clone, Default)]
pub struct DownloadCommand;

#[derive(Debug, Clone, Default)]
pub struct ListGalleryQuery;
