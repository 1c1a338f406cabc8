use std::path::PathBuf;

use imgv::ppm::DecodedImage;
use imgv::ppm::encoder::write_file;

const WIDTH: u32 = 256;
const HEIGHT: u32 = 192;
const MAX_INTENSITY: u16 = 255;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `-amplitude..=amplitude`.
    fn jitter(&mut self, amplitude: i32) -> i32 {
        let span = (2 * amplitude + 1) as u64;
        (self.next_u64() % span) as i32 - amplitude
    }
}

fn channel(value: i32) -> u8 {
    value.clamp(0, i32::from(MAX_INTENSITY)) as u8
}

/// Red grows left to right, green top to bottom, blue is a checkerboard.
/// A little noise keeps neighbouring pixels from being identical.
fn gradient(rng: &mut SimpleRng) -> Vec<u8> {
    let mut rgb = Vec::with_capacity((WIDTH * HEIGHT * 3) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let r = (x * 255 / (WIDTH - 1)) as i32;
            let g = (y * 255 / (HEIGHT - 1)) as i32;
            let b = if (x / 32 + y / 32) % 2 == 0 { 200 } else { 40 };
            rgb.push(channel(r + rng.jitter(6)));
            rgb.push(channel(g + rng.jitter(6)));
            rgb.push(channel(b + rng.jitter(6)));
        }
    }
    rgb
}

fn main() -> anyhow::Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample.ppm"));

    let mut rng = SimpleRng::new(42);
    let image = DecodedImage::from_rgb(
        output_path.display().to_string(),
        WIDTH,
        HEIGHT,
        MAX_INTENSITY,
        &gradient(&mut rng),
    )?;
    write_file(&output_path, &image)?;

    println!(
        "Wrote {WIDTH}x{HEIGHT} P3 image to {}",
        output_path.display()
    );
    Ok(())
}
