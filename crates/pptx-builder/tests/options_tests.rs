use pptx_builder::*;

#[test]
fn test_default_options() {
    let options = DeckOptions::default();
    assert_eq!(options.dpi, 300);
    assert_eq!(options.slide_size, SlideSize::Auto);
    assert_eq!(options.mode, PlacementMode::Fit);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_dpi_range() {
    let mut options = DeckOptions::default();

    options.dpi = 0;
    match options.validate() {
        Err(DeckError::Config(msg)) => assert!(msg.contains("DPI")),
        other => panic!("Expected Config error, got {:?}", other),
    }

    options.dpi = 1200;
    assert!(options.validate().is_ok());

    options.dpi = 1201;
    assert!(options.validate().is_err());

    options.dpi = 150;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_custom_size() {
    let mut options = DeckOptions::default();

    options.slide_size = SlideSize::Custom {
        width_in: 12.0,
        height_in: 9.0,
    };
    assert!(options.validate().is_ok());

    options.slide_size = SlideSize::Custom {
        width_in: -12.0,
        height_in: 9.0,
    };
    assert!(matches!(options.validate(), Err(DeckError::Config(_))));
}

#[test]
fn test_validation_custom_size_slide_limits() {
    let mut options = DeckOptions::default();

    for (width_in, height_in) in [(1.0, 1.0), (56.0, 56.0), (56.0, 1.0)] {
        options.slide_size = SlideSize::Custom {
            width_in,
            height_in,
        };
        assert!(options.validate().is_ok(), "{width_in} x {height_in}");
    }

    for (width_in, height_in) in [(60.0, 7.5), (10.0, 0.5), (0.99, 56.0)] {
        options.slide_size = SlideSize::Custom {
            width_in,
            height_in,
        };
        match options.validate() {
            Err(DeckError::Config(msg)) => assert!(msg.contains("range"), "{msg}"),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = DeckOptions {
        dpi: 150,
        slide_size: SlideSize::Preset(SlidePreset::A4),
        mode: PlacementMode::Fill,
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = DeckOptions::load(path).await.unwrap();
    assert_eq!(loaded, options);

    let json = std::fs::read_to_string(path).unwrap();
    assert!(json.contains("\"fill\""));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_options_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "dpi": 600 }"#).unwrap();

    let loaded = DeckOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.dpi, 600);
    assert_eq!(loaded.slide_size, SlideSize::Auto);
    assert_eq!(loaded.mode, PlacementMode::Fit);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_options() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "not json").unwrap();

    match DeckOptions::load(temp_file.path()).await {
        Err(DeckError::Config(msg)) => assert!(msg.contains("parse")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
