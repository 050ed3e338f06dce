use rand::Rng;

// Roughly one star per this many dots of field area.
const DOTS_PER_STAR: u32 = 180;

/// Background stars in field dots.
#[derive(Clone, Debug, Default)]
pub struct Starfield {
    pub stars: Vec<(u32, u32)>,
}

impl Starfield {
    pub fn new(width: u32, height: u32, rng: &mut impl Rng) -> Self {
        if width == 0 || height == 0 {
            return Starfield::default();
        }
        let count = (width * height) / DOTS_PER_STAR;
        let stars = (0..count)
            .map(|_| (rng.gen_range(0..width), rng.gen_range(0..height)))
            .collect();
        Starfield { stars }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn stars_stay_inside_the_field() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = Starfield::new(160, 96, &mut rng);
        assert_eq!(field.stars.len(), 160 * 96 / DOTS_PER_STAR as usize);
        assert!(field.stars.iter().all(|&(x, y)| x < 160 && y < 96));
    }

    #[test]
    fn empty_field_has_no_stars() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(Starfield::new(0, 40, &mut rng).stars.is_empty());
    }

    #[test]
    fn same_seed_same_sky() {
        let a = Starfield::new(100, 60, &mut StdRng::seed_from_u64(3));
        let b = Starfield::new(100, 60, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.stars, b.stars);
    }
}
