//! Domain-critical regression tests for gray-codec.
//!
//! These tests target the invariants every scheme must keep, not single
//! functions. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::api::{Codec, CodecError, Compressor, Scheme};
    use crate::artifact::CompressedArtifact;
    use crate::grid::{traversal, PixelGrid, PixelSource};
    use crate::huffman::{build_tree, generate_codes, FrequencyTable, HuffmanCodec, HuffmanDecoder};
    use crate::varint;

    /// Random image with `levels` distinct grey values and runs of random length.
    fn random_grid(rng: &mut StdRng, levels: u8) -> PixelGrid {
        let width = rng.gen_range(1..=40);
        let height = rng.gen_range(1..=40);
        let len = (width * height) as usize;
        let palette: Vec<u8> = (0..levels).map(|_| rng.gen()).collect();

        let mut data = Vec::with_capacity(len);
        while data.len() < len {
            let value = palette[rng.gen_range(0..palette.len())];
            let run = rng.gen_range(1..=300).min(len - data.len());
            data.extend(std::iter::repeat(value).take(run));
        }
        PixelGrid::from_raw(width, height, data).unwrap()
    }

    // ========================================================================
    // Round-trip: decompress(compress(G)) == G for every scheme
    // ========================================================================

    /// If this breaks, a codec loses or reorders pixels for some image
    /// shape or value distribution. Runs up to 300 cross the 255 boundary
    /// and column boundaries; levels 1 and 2 hit the single-leaf and
    /// two-leaf Huffman trees.
    #[test]
    fn test_round_trip_random_images() {
        let mut rng = StdRng::seed_from_u64(0x6a09_e667);
        for round in 0..60 {
            let levels = [1u8, 2, 3, 16, 255][round % 5];
            let grid = random_grid(&mut rng, levels);

            for scheme in Scheme::ALL {
                for decoder in [HuffmanDecoder::LengthScan, HuffmanDecoder::TreeWalk] {
                    let compressor = Compressor::new(scheme).huffman_decoder(decoder);
                    let compressed = compressor.compress(&grid).unwrap();
                    let restored = compressor.decompress(&compressed.artifact).unwrap();
                    assert_eq!(
                        restored.grid.first_mismatch(&grid),
                        None,
                        "REGRESSION: {scheme} ({decoder:?}) altered a {}x{} image with {levels} levels",
                        grid.width(),
                        grid.height()
                    );
                }
            }
        }
    }

    /// If this breaks, decoding ignores image geometry: tall, wide and
    /// one-pixel images must all come back untransposed.
    #[test]
    fn test_round_trip_degenerate_shapes() {
        let shapes = [(1, 1), (1, 300), (300, 1), (2, 255), (255, 2)];
        for (width, height) in shapes {
            let data: Vec<u8> = (0..width * height).map(|i| (i % 7 * 30) as u8).collect();
            let grid = PixelGrid::from_raw(width, height, data).unwrap();
            for scheme in Scheme::ALL {
                let compressor = Compressor::new(scheme);
                let artifact = compressor.compress(&grid).unwrap().artifact;
                assert_eq!(
                    compressor.decompress(&artifact).unwrap().grid,
                    grid,
                    "REGRESSION: {scheme} failed on {width}x{height}"
                );
            }
        }
    }

    // ========================================================================
    // Varint law
    // ========================================================================

    /// If this breaks, dimensions or run lengths decode to the wrong value,
    /// or a zero byte leaks into a non-zero varint (which the bit-plane
    /// decoder would read as an empty run).
    #[test]
    fn test_varint_law() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let n: u64 = rng.gen_range(0..200_000);
            let bytes = varint::encode(n);
            assert_eq!(varint::decode(&bytes), Ok(n));
            assert!(n == 0 || !bytes.contains(&0));
            assert!(bytes[..bytes.len() - 1].iter().all(|&b| b == 255));
        }
    }

    // ========================================================================
    // Huffman laws
    // ========================================================================

    /// If this breaks, two intensities share a code prefix and the decoder
    /// can no longer split the concatenated stream unambiguously.
    #[test]
    fn test_prefix_free_law() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let grid = random_grid(&mut rng, 64);
            let freqs = FrequencyTable::from_intensities(grid.as_raw());
            let codes = generate_codes(&build_tree(&freqs).unwrap());
            let all: Vec<_> = codes.iter().collect();
            for (i, (_, a)) in all.iter().enumerate() {
                for (_, b) in &all[i + 1..] {
                    assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a), "{a} vs {b}");
                }
            }
        }
    }

    /// If this breaks, Huffman output is larger than the raw 8-bit image,
    /// meaning the tree is not optimal.
    #[test]
    fn test_monotonic_compactness() {
        let mut rng = StdRng::seed_from_u64(13);
        for levels in [1u8, 2, 50, 255] {
            let grid = random_grid(&mut rng, levels);
            let artifact = HuffmanCodec::new().compress(&grid).unwrap();
            let CompressedArtifact::Huffman(inner) = artifact else {
                panic!("Expected Huffman artifact");
            };
            assert!(inner.bit_len <= 8 * grid.len() as u64);
        }

        // All 256 values equally often: the pathological equality case
        let uniform: Vec<u8> = (0..=255).collect();
        let grid = PixelGrid::from_raw(16, 16, uniform).unwrap();
        let CompressedArtifact::Huffman(inner) = HuffmanCodec::new().compress(&grid).unwrap() else {
            panic!("Expected Huffman artifact");
        };
        assert_eq!(inner.bit_len, 8 * 256);
    }

    /// If this breaks, a uniform image either encodes with zero bits per
    /// pixel or decodes to the wrong length.
    #[test]
    fn test_single_symbol_edge_case() {
        let grid = PixelGrid::from_raw(7, 9, vec![131; 63]).unwrap();
        for scheme in Scheme::ALL {
            let compressor = Compressor::new(scheme);
            let compressed = compressor.compress(&grid).unwrap();
            assert_eq!(compressor.decompress(&compressed.artifact).unwrap().grid, grid);
        }
        let CompressedArtifact::Huffman(inner) = HuffmanCodec::new().compress(&grid).unwrap() else {
            panic!("Expected Huffman artifact");
        };
        assert_eq!(inner.bit_len, 63);
    }

    /// If this breaks, the frequency-3 / frequency-1 image no longer gets
    /// the optimal one bit per symbol.
    #[test]
    fn test_two_symbol_assignment_is_minimal() {
        let freqs = FrequencyTable::from_intensities(&[40, 40, 40, 90]);
        let codes = generate_codes(&build_tree(&freqs).unwrap());
        let cost = codes.encoded_bits(&freqs);

        assert_eq!(codes.get(40).map(|c| c.len), Some(1));
        assert_eq!(codes.get(90).map(|c| c.len), Some(1));
        // Any prefix-free assignment of two symbols needs at least one bit each
        assert_eq!(cost, 4);
    }

    // ========================================================================
    // Concrete wire scenarios
    // ========================================================================

    /// If this breaks, the grayscale run format or traversal order changed.
    #[test]
    fn test_grayscale_scenario() {
        // Column 0 = [10, 10], column 1 = [20, 20]
        let grid = PixelGrid::from_raw(2, 2, vec![10, 20, 10, 20]).unwrap();
        assert_eq!(traversal::column_major(&grid), vec![10, 10, 20, 20]);

        let CompressedArtifact::RleGrayscale(inner) =
            Compressor::new(Scheme::RleGrayscale).compress(&grid).unwrap().artifact
        else {
            panic!("Expected RleGrayscale artifact");
        };
        assert_eq!(inner.header.width, vec![2]);
        assert_eq!(inner.header.height, vec![2]);
        assert_eq!(inner.runs, vec![2, 10, 2, 20]);
    }

    /// If this breaks, the bit-plane stream no longer starts on a white run.
    #[test]
    fn test_bitplane_scenario() {
        // Plane 0 of [1, 1, 0, 0, 1] is white-first; plane 0 of [0, 1, 0, 1] is not
        let white_first = PixelGrid::from_raw(1, 5, vec![1, 1, 0, 0, 1]).unwrap();
        let black_first = PixelGrid::from_raw(1, 4, vec![0, 1, 0, 1]).unwrap();

        let planes = |grid: &PixelGrid| match Compressor::new(Scheme::RleBitPlane)
            .compress(grid)
            .unwrap()
            .artifact
        {
            CompressedArtifact::RleBitPlane(inner) => inner.planes,
            _ => panic!("Expected RleBitPlane artifact"),
        };

        assert_eq!(planes(&white_first)[0], vec![2, 2, 1]);
        assert_eq!(planes(&black_first)[0], vec![0, 1, 1, 1, 1]);
        // Untouched planes are one black run behind an empty white run
        assert_eq!(planes(&white_first)[3], vec![0, 5]);
    }

    // ========================================================================
    // Corruption is reported, never panics
    // ========================================================================

    /// If this breaks, a damaged artifact crashes the decoder instead of
    /// returning an error.
    #[test]
    fn test_corrupted_artifacts_fail_cleanly() {
        let mut rng = StdRng::seed_from_u64(17);
        let grid = random_grid(&mut rng, 8);

        for scheme in Scheme::ALL {
            let compressor = Compressor::new(scheme);
            let artifact = compressor.compress(&grid).unwrap().artifact;

            for _ in 0..200 {
                let mut damaged = artifact.clone();
                let flip: u8 = rng.gen_range(1..=255);
                let target = match &mut damaged {
                    CompressedArtifact::Huffman(a) => match rng.gen_range(0..3) {
                        0 => &mut a.table,
                        1 => &mut a.bits,
                        _ => &mut a.header.height,
                    },
                    CompressedArtifact::RleGrayscale(a) => &mut a.runs,
                    CompressedArtifact::RleBitPlane(a) => &mut a.planes[rng.gen_range(0..8)],
                };
                if target.is_empty() {
                    continue;
                }
                let index = rng.gen_range(0..target.len());
                target[index] ^= flip;

                // Either a clean error or some image; never a panic
                if let Ok(decoded) = compressor.decompress(&damaged) {
                    assert_eq!(decoded.grid.len(), decoded.grid.width() as usize * decoded.grid.height() as usize);
                }
            }
        }
    }

    /// If this breaks, a header claiming a zero-sized image is accepted.
    #[test]
    fn test_zero_dimension_header_rejected() {
        let grid = PixelGrid::new(3, 3).unwrap();
        let mut artifact = Compressor::new(Scheme::RleGrayscale)
            .compress(&grid)
            .unwrap()
            .artifact;
        if let CompressedArtifact::RleGrayscale(inner) = &mut artifact {
            inner.header.width = vec![0];
        }
        assert!(matches!(
            Compressor::new(Scheme::RleGrayscale).decompress(&artifact),
            Err(CodecError::InvalidDimensions { width: 0, .. })
        ));
    }

    // ========================================================================
    // Foreign image surfaces
    // ========================================================================

    /// A procedural surface that is not a PixelGrid.
    struct Checkerboard {
        size: u32,
    }

    impl PixelSource for Checkerboard {
        fn width(&self) -> u32 {
            self.size
        }
        fn height(&self) -> u32 {
            self.size
        }
        fn intensity(&self, x: u32, y: u32) -> u8 {
            if (x + y) % 2 == 0 {
                0
            } else {
                255
            }
        }
    }

    /// If this breaks, codecs depend on PixelGrid internals rather than the
    /// PixelSource contract.
    #[test]
    fn test_compress_foreign_source() {
        let board = Checkerboard { size: 9 };
        let expected = PixelGrid::from_source(&board).unwrap();
        for scheme in Scheme::ALL {
            let compressor = Compressor::new(scheme);
            let compressed = compressor.compress(&board).unwrap();
            assert_eq!(compressor.decompress(&compressed.artifact).unwrap().grid, expected);
        }
    }

    /// If this breaks, an empty foreign surface slips past validation.
    #[test]
    fn test_empty_source_rejected() {
        let board = Checkerboard { size: 0 };
        for scheme in Scheme::ALL {
            assert!(matches!(
                Compressor::new(scheme).compress(&board),
                Err(CodecError::InvalidDimensions { .. })
            ));
        }
    }
}
