use rand::seq::SliceRandom;
use rand::Rng;

const SPARKS: [char; 6] = ['*', '+', '✦', '✧', '•', 'o'];
const PERFECT_BANNERS: [&str; 3] = ["PERFECT!", "FLAWLESS!", "ALL CORRECT!"];
const GRAVITY: f64 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    /// Banner letters glide to a fixed spot instead of falling.
    pub anchored: bool,
}

impl Particle {
    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        if self.anchored {
            self.vel_x *= 0.9;
            self.vel_y *= 0.9;
        } else {
            self.vel_y += GRAVITY * dt;
        }
        self.age += dt;
        self.age < self.max_age
    }
}

/// Burst shown on the summary screen when a session ends.
#[derive(Debug, Default)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub is_active: bool,
    elapsed: f64,
    duration: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Banner text for a finished session.
    pub fn banner_for<R: Rng + ?Sized>(perfect: bool, rng: &mut R) -> &'static str {
        if perfect {
            PERFECT_BANNERS.choose(rng).copied().unwrap_or("PERFECT!")
        } else {
            "FINISHED!"
        }
    }

    pub fn start<R: Rng + ?Sized>(&mut self, width: u16, height: u16, banner: &str, rng: &mut R) {
        self.particles.clear();
        self.is_active = true;
        self.elapsed = 0.0;
        self.duration = 3.0;

        let cx = width as f64 / 2.0;
        let cy = height as f64 / 3.0;
        let letters: Vec<char> = banner.chars().collect();
        let spacing = 2.0;
        let left = cx - (letters.len().saturating_sub(1) as f64 * spacing) / 2.0;

        for (i, ch) in letters.into_iter().enumerate().filter(|(_, c)| *c != ' ') {
            let (sx, sy) = (cx + rng.gen_range(-8.0..8.0), cy + rng.gen_range(-4.0..4.0));
            let (tx, ty) = (left + i as f64 * spacing, cy);
            self.particles.push(Particle {
                x: sx,
                y: sy,
                // settles on (tx, ty) with 0.9 damping at a 100ms tick
                vel_x: tx - sx,
                vel_y: ty - sy,
                symbol: ch,
                color_index: rng.gen_range(0..7),
                age: 0.0,
                max_age: self.duration,
                anchored: true,
            });
        }

        for _ in 0..30 {
            self.particles.push(Particle {
                x: cx + rng.gen_range(-15.0..15.0),
                y: cy + rng.gen_range(-3.0..6.0),
                vel_x: rng.gen_range(-4.0..4.0),
                vel_y: rng.gen_range(-6.0..-1.0),
                symbol: *SPARKS.choose(rng).unwrap_or(&'*'),
                color_index: rng.gen_range(0..7),
                age: 0.0,
                max_age: rng.gen_range(1.5..3.0),
                anchored: false,
            });
        }
    }

    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }
        self.elapsed += dt;
        self.particles.retain_mut(|p| p.update(dt));
        if self.elapsed >= self.duration || self.particles.is_empty() {
            self.stop();
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn start_spawns_banner_and_sparks() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = Celebration::new();
        c.start(80, 24, "GO GO", &mut rng);

        assert!(c.is_active);
        assert_eq!(c.particles.iter().filter(|p| p.anchored).count(), 4);
        assert_eq!(c.particles.iter().filter(|p| !p.anchored).count(), 30);
    }

    #[test]
    fn animation_ends_after_duration() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut c = Celebration::new();
        c.start(80, 24, "OK", &mut rng);

        for _ in 0..29 {
            c.update(0.1);
        }
        assert!(c.is_active);
        c.update(0.2);
        assert!(!c.is_active);
        assert!(c.particles.is_empty());
    }

    #[test]
    fn update_is_a_no_op_when_idle() {
        let mut c = Celebration::new();
        c.update(1.0);
        assert!(!c.is_active);
    }

    #[test]
    fn banner_depends_on_result() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(Celebration::banner_for(false, &mut rng), "FINISHED!");
        assert!(PERFECT_BANNERS.contains(&Celebration::banner_for(true, &mut rng)));
    }
}
