use std::ffi::OsString;
use std::path::Path;

/// Encoder name the capability probe looks for in the `-encoders` listing.
pub const HARDWARE_ENCODER: &str = "hevc_videotoolbox";

// VideoToolbox takes -q:v 0..100 (higher is better) instead of CRF.
const HARDWARE_QUALITY: u32 = 65;

/// Resolved set of ffmpeg invocation parameters. Computed once at startup
/// (software or hardware variant) and shared by every job.
#[derive(Debug, Clone)]
pub struct EncoderProfile {
    pub video_codec: String,
    pub container_tag: String,
    /// libx265 preset; the hardware encoder takes none
    pub preset: Option<String>,
    pub quality_flag: String,
    pub quality: u32,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

impl EncoderProfile {
    /// Software path: libx265 with CRF quality control.
    pub fn software(preset: &str, crf: u32, audio_bitrate: &str) -> Self {
        Self {
            video_codec: String::from("libx265"),
            container_tag: String::from("hvc1"),
            preset: Some(preset.to_string()),
            quality_flag: String::from("-crf"),
            quality: crf,
            audio_codec: String::from("aac"),
            audio_bitrate: audio_bitrate.to_string(),
        }
    }

    /// Hardware path: VideoToolbox HEVC.
    pub fn hardware(audio_bitrate: &str) -> Self {
        Self {
            video_codec: String::from(HARDWARE_ENCODER),
            container_tag: String::from("hvc1"),
            preset: None,
            quality_flag: String::from("-q:v"),
            quality: HARDWARE_QUALITY,
            audio_codec: String::from("aac"),
            audio_bitrate: audio_bitrate.to_string(),
        }
    }

    pub fn is_hardware(&self) -> bool {
        self.video_codec == HARDWARE_ENCODER
    }

    /// The fixed argument list for one transcode, overwrite flag included.
    pub fn encode_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![OsString::from("-i"), OsString::from(input)];
        args.push(OsString::from("-c:v"));
        args.push(OsString::from(&self.video_codec));
        args.push(OsString::from("-tag:v"));
        args.push(OsString::from(&self.container_tag));
        if let Some(preset) = &self.preset {
            args.push(OsString::from("-preset"));
            args.push(OsString::from(preset));
        }
        args.push(OsString::from(&self.quality_flag));
        args.push(OsString::from(self.quality.to_string()));
        args.push(OsString::from("-c:a"));
        args.push(OsString::from(&self.audio_codec));
        args.push(OsString::from("-b:a"));
        args.push(OsString::from(&self.audio_bitrate));
        args.push(OsString::from("-y"));
        args.push(OsString::from(output));
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn as_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|arg| arg.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_software_args_fixed_form() {
        let profile = EncoderProfile::software("faster", 28, "128k");
        let args = as_strings(
            profile.encode_args(&PathBuf::from("input/a.mov"), &PathBuf::from("output/a.mp4")),
        );

        assert_eq!(
            args,
            vec![
                "-i", "input/a.mov", "-c:v", "libx265", "-tag:v", "hvc1", "-preset", "faster",
                "-crf", "28", "-c:a", "aac", "-b:a", "128k", "-y", "output/a.mp4",
            ]
        );
    }

    #[test]
    fn test_hardware_args_omit_preset() {
        let profile = EncoderProfile::hardware("128k");
        let args = as_strings(
            profile.encode_args(&PathBuf::from("in.mov"), &PathBuf::from("out.mp4")),
        );

        assert!(!args.contains(&String::from("-preset")));
        assert!(args.contains(&String::from("hevc_videotoolbox")));
        assert!(args.contains(&String::from("-q:v")));
    }

    #[test]
    fn test_overwrite_flag_precedes_output() {
        let profile = EncoderProfile::software("faster", 28, "128k");
        let args = as_strings(
            profile.encode_args(&PathBuf::from("in.mov"), &PathBuf::from("out.mp4")),
        );

        let len = args.len();
        assert_eq!(args[len - 2], "-y");
        assert_eq!(args[len - 1], "out.mp4");
    }

    #[test]
    fn test_is_hardware() {
        assert!(EncoderProfile::hardware("128k").is_hardware());
        assert!(!EncoderProfile::software("faster", 28, "128k").is_hardware());
    }
}
