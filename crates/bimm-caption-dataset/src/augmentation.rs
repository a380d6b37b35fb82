//! Stochastic image augmentation.
use crate::error::DatasetError;
use crate::probability::try_probability;
use image::DynamicImage;
use rand::Rng;

/// Flips the image horizontally with probability `prob`.
///
/// The draw is made on every call; nothing is cached per example.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomHorizontalFlip {
    /// The probability of flipping.
    prob: f64,
}

impl RandomHorizontalFlip {
    /// Construct a new `RandomHorizontalFlip`.
    pub fn new(prob: f64) -> Result<Self, DatasetError> {
        Ok(Self {
            prob: try_probability("flip_p", prob)?,
        })
    }

    /// The flip probability.
    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Draw whether to flip.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> bool {
        rng.random::<f64>() < self.prob
    }

    /// Apply the stage to the image.
    pub fn augment_image<R: Rng + ?Sized>(
        &self,
        image: DynamicImage,
        rng: &mut R,
    ) -> DynamicImage {
        if self.sample(rng) {
            image.fliph()
        } else {
            image
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageShape;
    use crate::test_util::generate_gradient_pattern;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_flip_extremes() {
        let source: DynamicImage = generate_gradient_pattern(ImageShape {
            width: 8,
            height: 4,
        })
        .into();
        let mut rng = StdRng::seed_from_u64(7);

        let never = RandomHorizontalFlip::new(0.0).unwrap();
        let always = RandomHorizontalFlip::new(1.0).unwrap();
        for _ in 0..16 {
            assert_eq!(never.augment_image(source.clone(), &mut rng), source);
            assert_eq!(
                always.augment_image(source.clone(), &mut rng),
                source.fliph()
            );
        }
    }

    #[test]
    fn test_flip_rate() {
        let flip = RandomHorizontalFlip::new(0.25).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let trials = 10_000;
        let flips = (0..trials).filter(|_| flip.sample(&mut rng)).count();
        let rate = flips as f64 / trials as f64;
        assert!((rate - 0.25).abs() < 0.03, "rate = {rate}");
    }

    #[test]
    fn test_invalid_prob() {
        assert!(RandomHorizontalFlip::new(-0.1).is_err());
        assert!(RandomHorizontalFlip::new(1.1).is_err());
    }
}
