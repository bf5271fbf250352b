//! Domain-level properties of the translation pipeline.
//!
//! Each test states the property it checks and what a failure would mean.
//! Random inputs come from a seeded generator so failures reproduce.

#[cfg(test)]
mod domain_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::cam::{JMh, ViewingConditions};
    use crate::codec::{to_perceptual, Codec};
    use crate::color::Rgb;
    use crate::error::{NumericDomainError, Stage};
    use crate::gamut::{constrain, project_to_gamut};
    use crate::translate::{translate, Translation};

    fn random_rgb(rng: &mut StdRng, lo: f64, hi: f64) -> Rgb {
        Rgb::new(
            rng.gen_range(lo..=hi),
            rng.gen_range(lo..=hi),
            rng.gen_range(lo..=hi),
        )
    }

    fn hue_difference(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    // ========================================================================
    // Codec
    // ========================================================================

    /// If this breaks, the inverse model no longer matches the forward model:
    /// translating a scheme to its own background would change it.
    #[test]
    fn test_round_trip_in_gamut() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for (name, conditions) in ViewingConditions::PRESETS {
            let codec = Codec::new(&conditions);
            for _ in 0..300 {
                let rgb = random_rgb(&mut rng, 0.0, 1.0);
                let back = codec.to_rgb(codec.to_perceptual(rgb)).unwrap();
                assert!(
                    rgb.max_difference(back) < 1e-4,
                    "{name}: {rgb:?} round-tripped to {back:?}"
                );
            }
        }
    }

    /// If this breaks, the gamma curve has stopped mirroring negative inputs
    /// and the gamut search will see NaN next to the cube's faces.
    #[test]
    fn test_slightly_negative_rgb_is_finite() {
        for (name, conditions) in ViewingConditions::PRESETS {
            for rgb in [
                Rgb::new(-0.01, 0.5, 0.5),
                Rgb::new(0.5, -0.01, 0.5),
                Rgb::new(0.5, 0.5, -0.01),
            ] {
                let ucs = to_perceptual(rgb, &conditions);
                assert!(ucs.is_finite(), "{name}: {rgb:?} -> {ucs:?}");
            }
        }
    }

    // ========================================================================
    // Gamut constraint
    // ========================================================================

    /// If this breaks, in-gamut colors are being nudged by the solver, so
    /// an identity translation would no longer be byte-exact.
    #[test]
    fn test_constrain_is_identity_in_gamut() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut colors: Vec<Rgb> = (0..200).map(|_| random_rgb(&mut rng, 0.0, 1.0)).collect();
        for r in [0.0, 1.0] {
            for g in [0.0, 1.0] {
                for b in [0.0, 1.0] {
                    colors.push(Rgb::new(r, g, b));
                }
            }
        }
        for (name, conditions) in ViewingConditions::PRESETS {
            for &rgb in &colors {
                let constrained = constrain(rgb, &conditions).unwrap();
                assert_eq!(constrained, rgb, "{name}: in-gamut color moved");
            }
        }
    }

    /// If this breaks, out-of-gamut colors can leak into written schemes.
    /// The only failure allowed is the target itself having no appearance
    /// correlates; the search never fails once it has a target.
    fn assert_projects_or_has_no_target(name: &str, rgb: Rgb, conditions: &ViewingConditions) {
        match project_to_gamut(rgb, conditions) {
            Ok(projection) => assert!(
                projection.rgb.is_in_gamut(),
                "{name}: {rgb:?} projected to {:?}",
                projection.rgb
            ),
            Err(e) => assert!(
                matches!(
                    e,
                    NumericDomainError::NonFinite {
                        stage: Stage::Perceptual,
                        ..
                    }
                ),
                "{name}: {rgb:?} failed with {e}"
            ),
        }
    }

    #[test]
    fn test_constrain_always_lands_in_gamut() {
        let mut rng = StdRng::seed_from_u64(42);
        let presets = ViewingConditions::PRESETS;
        for i in 0..300 {
            let (name, conditions) = presets[i % presets.len()];
            let rgb = random_rgb(&mut rng, -0.2, 1.2);
            assert_projects_or_has_no_target(name, rgb, &conditions);
        }
    }

    #[test]
    fn test_constrain_grid_lands_in_gamut() {
        let steps: Vec<f64> = (0..7).map(|i| -0.2 + 1.4 * f64::from(i) / 6.0).collect();
        for (name, conditions) in ViewingConditions::PRESETS {
            for &r in &steps {
                for &g in &steps {
                    for &b in &steps {
                        assert_projects_or_has_no_target(name, Rgb::new(r, g, b), &conditions);
                    }
                }
            }
        }
    }

    /// Slightly negative near-black has negative colorfulness, which has no
    /// CAM02-UCS image.
    #[test]
    fn test_near_black_below_zero_has_no_target() {
        let rgb = Rgb::new(0.0, -0.01, 0.0);
        let err = project_to_gamut(rgb, &ViewingConditions::DARK).unwrap_err();
        match err {
            NumericDomainError::NonFinite { stage, components } => {
                assert_eq!(stage, Stage::Perceptual);
                assert!(components[0].is_finite(), "{components:?}");
                assert!(components[1].is_nan(), "{components:?}");
            }
            other => panic!("unexpected error {other}"),
        }
        assert!(constrain(rgb, &ViewingConditions::DARK).is_err());
    }

    // ========================================================================
    // Translation
    // ========================================================================

    /// If this breaks, same-conditions translation is not a no-op.
    #[test]
    fn test_identity_translation() {
        let mut rng = StdRng::seed_from_u64(99);
        for (name, conditions) in ViewingConditions::PRESETS {
            for _ in 0..50 {
                let rgb = random_rgb(&mut rng, 0.0, 1.0);
                let out = translate(rgb, &conditions, &conditions, false, 1.0, 1.0).unwrap();
                assert!(
                    rgb.max_difference(out) < 1e-4,
                    "{name}: {rgb:?} -> {out:?}"
                );
            }
        }
    }

    /// If this breaks, lightness inversion is no longer its own inverse for
    /// colors whose inversion stays in gamut.
    #[test]
    fn test_double_inversion_restores_color() {
        let colors = [
            Rgb::new(0.5, 0.5, 0.5),
            Rgb::new(0.4, 0.45, 0.5),
            Rgb::new(0.6, 0.4, 0.4),
            Rgb::new(0.3, 0.3, 0.3),
        ];
        for (name, conditions) in ViewingConditions::PRESETS {
            let inversion = Translation::new(&conditions, &conditions).invert_lightness(true);
            for rgb in colors {
                let once = inversion.apply(rgb).unwrap();
                let twice = inversion.apply(once).unwrap();
                assert!(
                    rgb.max_difference(twice) < 1e-4,
                    "{name}: {rgb:?} -> {once:?} -> {twice:?}"
                );
            }
        }
    }

    /// If this breaks, inversion is mirroring something other than lightness.
    #[test]
    fn test_inversion_swaps_dark_and_light_greys() {
        let conditions = ViewingConditions::NEUTRAL;
        let inversion = Translation::new(&conditions, &conditions).invert_lightness(true);
        let dark = inversion.apply(Rgb::new(0.3, 0.3, 0.3)).unwrap();
        let light = inversion.apply(Rgb::new(0.6, 0.6, 0.6)).unwrap();
        assert!(dark.g > 0.5, "dark grey inverted to {dark:?}");
        assert!(light.g < 0.5, "light grey inverted to {light:?}");
    }

    /// If this breaks, white is no longer white after a background change;
    /// every scheme's foreground would get a visible tint.
    #[test]
    fn test_white_survives_dark_to_light() {
        let white = Rgb::new(1.0, 1.0, 1.0);
        let out = translate(
            white,
            &ViewingConditions::DARK,
            &ViewingConditions::LIGHT,
            false,
            1.0,
            1.0,
        )
        .unwrap();
        assert!(
            out.r > 0.98 && out.g > 0.98 && out.b > 0.98,
            "white translated to {out:?}"
        );
    }

    /// If this breaks, lightness scaling is leaking into hue, or the gamut
    /// projection is undoing the scaling.
    #[test]
    fn test_red_half_lightness_keeps_hue() {
        let conditions = ViewingConditions::NEUTRAL;
        let red = Rgb::new(1.0, 0.0, 0.0);
        let out = translate(red, &conditions, &conditions, false, 0.5, 1.0).unwrap();

        let before = to_perceptual(red, &conditions);
        let after = to_perceptual(out, &conditions);
        assert!(
            hue_difference(before.hue(), after.hue()) < 2.0,
            "hue moved from {:.2} to {:.2}",
            before.hue(),
            after.hue()
        );

        let ratio = JMh::from(after).lightness / JMh::from(before).lightness;
        assert!(
            (0.4..0.6).contains(&ratio),
            "lightness ratio {ratio:.3}, expected about 0.5"
        );
        assert!(out.r < 0.7 && out.g < 0.01 && out.b < 0.01, "{out:?}");
    }

    /// If this breaks, colorfulness scaling is changing lightness or hue.
    #[test]
    fn test_desaturation_moves_towards_grey() {
        let conditions = ViewingConditions::NEUTRAL;
        let color = Rgb::new(0.7, 0.3, 0.2);
        let out = translate(color, &conditions, &conditions, false, 1.0, 0.0).unwrap();
        let spread = out.r.max(out.g).max(out.b) - out.r.min(out.g).min(out.b);
        // Zero colorfulness is the adapted white axis, slightly warmer than
        // D65 grey under incomplete adaptation
        assert!(spread < 0.05, "{out:?}");

        let before = to_perceptual(color, &conditions);
        let after = to_perceptual(out, &conditions);
        assert!((before.j - after.j).abs() < 1e-3, "{before:?} vs {after:?}");
    }
}
