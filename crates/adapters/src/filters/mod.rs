use filter_studio_application::FilterRenderer;
use filter_studio_domain::{Bitmap, FilterComposition, FilterEffect, BYTES_PER_PIXEL};

type ColorMatrix = [[f32; 3]; 3];

/// Applies a filter composition on the CPU, one effect at a time, in composition order.
///
/// Colour effects follow the Filter Effects matrices and work on straight sRGB values in
/// `[0, 1]`, clamped after every stage. Blur runs on premultiplied RGBA.
#[derive(Debug, Default)]
pub struct CpuFilterRenderer;

impl FilterRenderer for CpuFilterRenderer {
    fn render(&self, source: &Bitmap, composition: &FilterComposition) -> Bitmap {
        let mut frame = source.clone();
        if composition.is_identity() {
            return frame;
        }

        let mut canvas = FloatCanvas::from_bitmap(source);
        for effect in composition.effects() {
            canvas.apply(effect);
        }
        canvas.write_to(frame.pixels_mut());
        frame
    }
}

struct FloatCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl FloatCanvas {
    fn from_bitmap(bitmap: &Bitmap) -> Self {
        let pixels = bitmap
            .pixels()
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|rgba| {
                [
                    f32::from(rgba[0]) / 255.0,
                    f32::from(rgba[1]) / 255.0,
                    f32::from(rgba[2]) / 255.0,
                    f32::from(rgba[3]) / 255.0,
                ]
            })
            .collect();
        Self {
            width: bitmap.width(),
            height: bitmap.height(),
            pixels,
        }
    }

    fn apply(&mut self, effect: &FilterEffect) {
        if effect.is_identity() {
            return;
        }
        match *effect {
            FilterEffect::Brightness(percent) => {
                let slope = percent / 100.0;
                self.map_channels(|channel| channel * slope);
            }
            FilterEffect::Contrast(percent) => {
                let slope = percent / 100.0;
                self.map_channels(|channel| (channel - 0.5) * slope + 0.5);
            }
            FilterEffect::Saturate(percent) => {
                self.apply_matrix(&saturate_matrix(percent / 100.0));
            }
            FilterEffect::Blur(radius) => self.blur(radius),
            FilterEffect::Grayscale(percent) => {
                self.apply_matrix(&grayscale_matrix(amount(percent)));
            }
            FilterEffect::Sepia(percent) => self.apply_matrix(&sepia_matrix(amount(percent))),
            FilterEffect::Invert(percent) => {
                let strength = amount(percent);
                self.map_channels(|channel| strength + channel * (1.0 - 2.0 * strength));
            }
            FilterEffect::HueRotate(degrees) => self.apply_matrix(&hue_rotate_matrix(degrees)),
        }
    }

    fn map_channels(&mut self, transfer: impl Fn(f32) -> f32) {
        for pixel in &mut self.pixels {
            for channel in &mut pixel[..3] {
                *channel = transfer(*channel).clamp(0.0, 1.0);
            }
        }
    }

    fn apply_matrix(&mut self, matrix: &ColorMatrix) {
        for pixel in &mut self.pixels {
            let [red, green, blue, _] = *pixel;
            for (row, channel) in matrix.iter().zip(pixel.iter_mut()) {
                *channel = (row[0] * red + row[1] * green + row[2] * blue).clamp(0.0, 1.0);
            }
        }
    }

    // The radius is the Gaussian standard deviation in pixels. Everything outside the image
    // counts as transparent black, so opaque edges fade out.
    fn blur(&mut self, sigma: f32) {
        let Some(passes) = BlurPasses::for_sigma(sigma) else {
            return;
        };
        let width = self.width as usize;
        let height = self.height as usize;
        let mut premultiplied: Vec<[f32; 4]> = self
            .pixels
            .iter()
            .map(|&[red, green, blue, alpha]| [red * alpha, green * alpha, blue * alpha, alpha])
            .collect();

        let mut line = Vec::with_capacity(width.max(height));
        for row in premultiplied.chunks_exact_mut(width) {
            line.clear();
            line.extend_from_slice(row);
            passes.run(&mut line);
            row.copy_from_slice(&line);
        }
        for x in 0..width {
            line.clear();
            line.extend((0..height).map(|y| premultiplied[y * width + x]));
            passes.run(&mut line);
            for (y, value) in line.iter().enumerate() {
                premultiplied[y * width + x] = *value;
            }
        }

        for (pixel, [red, green, blue, alpha]) in self.pixels.iter_mut().zip(premultiplied) {
            *pixel = if alpha > 0.0 {
                [
                    (red / alpha).clamp(0.0, 1.0),
                    (green / alpha).clamp(0.0, 1.0),
                    (blue / alpha).clamp(0.0, 1.0),
                    alpha.clamp(0.0, 1.0),
                ]
            } else {
                [0.0; 4]
            };
        }
    }

    fn write_to(&self, out: &mut [u8]) {
        for (rgba, pixel) in out.chunks_exact_mut(BYTES_PER_PIXEL).zip(&self.pixels) {
            for (byte, channel) in rgba.iter_mut().zip(pixel) {
                *byte = (channel * 255.0).round() as u8;
            }
        }
    }
}

/// One-dimensional blur applied to every row and then every column.
///
/// Small deviations use a sampled Gaussian. From two pixels up the Gaussian is approximated by
/// three successive box blurs, which costs the same per pixel for any radius.
#[derive(Debug, Clone, PartialEq)]
enum BlurPasses {
    Kernel(Vec<f32>),
    Boxes([BoxWindow; 3]),
}

/// A box covering `left` samples before and `right` samples after the output sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoxWindow {
    left: usize,
    right: usize,
}

impl BlurPasses {
    fn for_sigma(sigma: f32) -> Option<Self> {
        if sigma.is_nan() || sigma <= 0.0 {
            return None;
        }
        if sigma < 2.0 {
            let radius = (sigma * 3.0).ceil() as i32;
            let denominator = 2.0 * sigma * sigma;
            let weights: Vec<f32> = (-radius..=radius)
                .map(|offset| (-((offset * offset) as f32) / denominator).exp())
                .collect();
            let total: f32 = weights.iter().sum();
            return Some(Self::Kernel(weights.iter().map(|w| w / total).collect()));
        }

        let size =
            (sigma * 3.0 * (2.0 * std::f32::consts::PI).sqrt() / 4.0 + 0.5).floor() as usize;
        let half = size / 2;
        let windows = if size % 2 == 1 {
            [BoxWindow {
                left: half,
                right: half,
            }; 3]
        } else {
            [
                BoxWindow {
                    left: half,
                    right: half - 1,
                },
                BoxWindow {
                    left: half - 1,
                    right: half,
                },
                BoxWindow {
                    left: half,
                    right: half,
                },
            ]
        };
        Some(Self::Boxes(windows))
    }

    /// How far one input sample can spread across all passes.
    fn reach(&self) -> usize {
        match self {
            Self::Kernel(weights) => weights.len() / 2,
            Self::Boxes(windows) => windows.iter().map(|w| w.left.max(w.right)).sum(),
        }
    }

    /// Blurs `line` in place. Samples beyond both ends are zero.
    fn run(&self, line: &mut Vec<[f32; 4]>) {
        let len = line.len();
        let reach = self.reach();
        let mut padded = vec![[0.0; 4]; len + 2 * reach];
        padded[reach..reach + len].copy_from_slice(line);

        let mut scratch = Vec::with_capacity(padded.len());
        match self {
            Self::Kernel(weights) => {
                convolve(&padded, &mut scratch, weights);
                std::mem::swap(&mut padded, &mut scratch);
            }
            Self::Boxes(windows) => {
                for window in windows {
                    box_pass(&padded, &mut scratch, *window);
                    std::mem::swap(&mut padded, &mut scratch);
                }
            }
        }

        line.clear();
        line.extend_from_slice(&padded[reach..reach + len]);
    }
}

fn convolve(src: &[[f32; 4]], dst: &mut Vec<[f32; 4]>, weights: &[f32]) {
    let radius = weights.len() / 2;
    dst.clear();
    for center in 0..src.len() {
        let mut sum = [0.0_f32; 4];
        for (tap, weight) in weights.iter().enumerate() {
            let Some(index) = (center + tap).checked_sub(radius) else {
                continue;
            };
            let Some(sample) = src.get(index) else {
                break;
            };
            for (acc, channel) in sum.iter_mut().zip(sample) {
                *acc += weight * channel;
            }
        }
        dst.push(sum);
    }
}

fn box_pass(src: &[[f32; 4]], dst: &mut Vec<[f32; 4]>, window: BoxWindow) {
    let len = src.len();
    let scale = 1.0 / (window.left + window.right + 1) as f64;
    let mut sum = [0.0_f64; 4];
    for sample in src.iter().take(window.right + 1) {
        add_sample(&mut sum, sample, 1.0);
    }

    dst.clear();
    for index in 0..len {
        dst.push(sum.map(|channel| (channel * scale) as f32));
        if let Some(entering) = src.get(index + window.right + 1) {
            add_sample(&mut sum, entering, 1.0);
        }
        if let Some(leaving) = index.checked_sub(window.left).map(|i| &src[i]) {
            add_sample(&mut sum, leaving, -1.0);
        }
    }
}

fn add_sample(sum: &mut [f64; 4], sample: &[f32; 4], sign: f64) {
    for (acc, channel) in sum.iter_mut().zip(sample) {
        *acc += sign * f64::from(*channel);
    }
}

/// Percent amounts for grayscale, sepia and invert saturate at 100%.
fn amount(percent: f32) -> f32 {
    (percent / 100.0).clamp(0.0, 1.0)
}

fn saturate_matrix(s: f32) -> ColorMatrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn grayscale_matrix(a: f32) -> ColorMatrix {
    let keep = 1.0 - a;
    [
        [0.2126 + 0.7874 * keep, 0.7152 - 0.7152 * keep, 0.0722 - 0.0722 * keep],
        [0.2126 - 0.2126 * keep, 0.7152 + 0.2848 * keep, 0.0722 - 0.0722 * keep],
        [0.2126 - 0.2126 * keep, 0.7152 - 0.7152 * keep, 0.0722 + 0.9278 * keep],
    ]
}

fn sepia_matrix(a: f32) -> ColorMatrix {
    let keep = 1.0 - a;
    [
        [0.393 + 0.607 * keep, 0.769 - 0.769 * keep, 0.189 - 0.189 * keep],
        [0.349 - 0.349 * keep, 0.686 + 0.314 * keep, 0.168 - 0.168 * keep],
        [0.272 - 0.272 * keep, 0.534 - 0.534 * keep, 0.131 + 0.869 * keep],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> ColorMatrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}
