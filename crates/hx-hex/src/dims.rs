use hx_core::Error;

/// Scale factors and row stagger for one conversion.
///
/// The defaults shrink width to 85% and height to 90% and shift odd rows by
/// half a cell, which approximates hexagonal close packing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexConfig {
    /// Target width as a fraction of source width, in `(0, 1]`.
    pub scale_x: f64,
    /// Target height as a fraction of source height, in `(0, 1]`.
    pub scale_y: f64,
    /// Horizontal shift of odd rows, in target cells, in `[0, 1)`.
    pub stagger: f64,
}

impl Default for HexConfig {
    fn default() -> Self {
        Self {
            scale_x: 0.85,
            scale_y: 0.9,
            stagger: 0.5,
        }
    }
}

impl HexConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.scale_x > 0.0 && self.scale_x <= 1.0) {
            return Err(Error::InvalidConfig("scale_x must lie in (0, 1]"));
        }
        if !(self.scale_y > 0.0 && self.scale_y <= 1.0) {
            return Err(Error::InvalidConfig("scale_y must lie in (0, 1]"));
        }
        if !(self.stagger >= 0.0 && self.stagger < 1.0) {
            return Err(Error::InvalidConfig("stagger must lie in [0, 1)"));
        }
        Ok(())
    }

    /// Raw `(floor(w * scale_x), floor(h * scale_y))` with no validation.
    #[inline]
    pub fn target_dims(&self, src_w: usize, src_h: usize) -> (usize, usize) {
        (
            (src_w as f64 * self.scale_x).floor() as usize,
            (src_h as f64 * self.scale_y).floor() as usize,
        )
    }
}

/// Target dimensions for a `src_w x src_h` source.
///
/// Fails with `InvalidDimensions` for an empty source and with
/// `DegenerateOutput` when either target axis rounds down to zero, so an
/// empty target is never produced.
pub fn hex_dims(src_w: usize, src_h: usize, cfg: &HexConfig) -> Result<(usize, usize), Error> {
    cfg.validate()?;

    if src_w == 0 || src_h == 0 {
        return Err(Error::InvalidDimensions {
            width: src_w,
            height: src_h,
        });
    }

    let (width, height) = cfg.target_dims(src_w, src_h);
    if width == 0 || height == 0 {
        return Err(Error::DegenerateOutput {
            src_width: src_w,
            src_height: src_h,
            width,
            height,
        });
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use hx_core::{Error, ErrorKind};

    use super::{HexConfig, hex_dims};

    #[test]
    fn default_factors_on_known_sizes() {
        let cfg = HexConfig::default();
        assert_eq!(hex_dims(10, 10, &cfg), Ok((8, 9)));
        assert_eq!(hex_dims(2, 2, &cfg), Ok((1, 1)));
        assert_eq!(hex_dims(100, 100, &cfg), Ok((85, 90)));
        assert_eq!(hex_dims(1920, 1080, &cfg), Ok((1632, 972)));
        assert_eq!(hex_dims(7, 3, &cfg), Ok((5, 2)));
    }

    #[test]
    fn target_never_exceeds_source() {
        let cfg = HexConfig::default();
        for w in 2..200 {
            for h in [2usize, 3, 11, 64] {
                let (tw, th) = hex_dims(w, h, &cfg).expect("non-degenerate");
                assert!(tw >= 1 && tw <= w);
                assert!(th >= 1 && th <= h);
                assert_eq!(tw, (w as f64 * 0.85).floor() as usize);
                assert_eq!(th, (h as f64 * 0.9).floor() as usize);
            }
        }
    }

    #[test]
    fn single_pixel_axes_are_degenerate() {
        let cfg = HexConfig::default();

        let err = hex_dims(1, 10, &cfg).expect_err("width 1");
        assert_eq!(err.kind(), ErrorKind::DegenerateOutput);
        assert_eq!(
            err,
            Error::DegenerateOutput {
                src_width: 1,
                src_height: 10,
                width: 0,
                height: 9,
            }
        );

        let err = hex_dims(10, 1, &cfg).expect_err("height 1");
        assert_eq!(err.kind(), ErrorKind::DegenerateOutput);
    }

    #[test]
    fn empty_source_is_invalid_input() {
        let cfg = HexConfig::default();
        assert_eq!(
            hex_dims(0, 5, &cfg),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert_eq!(
            hex_dims(5, 0, &cfg).map_err(|e| e.kind()),
            Err(ErrorKind::InvalidInput)
        );
    }

    #[test]
    fn out_of_range_config_is_rejected() {
        let bad = [
            HexConfig {
                scale_x: 0.0,
                ..HexConfig::default()
            },
            HexConfig {
                scale_y: 1.5,
                ..HexConfig::default()
            },
            HexConfig {
                stagger: 1.0,
                ..HexConfig::default()
            },
            HexConfig {
                scale_x: f64::NAN,
                ..HexConfig::default()
            },
        ];
        for cfg in bad {
            let err = hex_dims(10, 10, &cfg).expect_err("invalid config");
            assert!(matches!(err, Error::InvalidConfig(_)));
        }
    }
}
