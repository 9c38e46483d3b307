use crate::error::RecordError;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use image::{ColorType, DynamicImage, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};

/// The two image formats that can be embedded in a report
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContentType {
    Jpeg,
    Png,
}

impl ContentType {
    /// Match a transport content-type exactly. Anything other than `image/jpeg`,
    /// `image/jpg` or `image/png` (including a missing or empty value) is unsupported.
    pub fn parse(content_type: Option<&str>) -> Result<ContentType, RecordError> {
        match content_type {
            Some("image/jpeg") | Some("image/jpg") => Ok(ContentType::Jpeg),
            Some("image/png") => Ok(ContentType::Png),
            Some(other) => Err(RecordError::UnsupportedFormat(other.to_string())),
            None => Err(RecordError::UnsupportedFormat(String::new())),
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            ContentType::Jpeg => ImageFormat::Jpeg,
            ContentType::Png => ImageFormat::Png,
        }
    }
}

pub enum ImageData {
    /// A baseline JPEG whose original bytes can be handed to the PDF reader as-is
    DirectlyEmbeddableJpeg { bytes: Vec<u8>, grey: bool },
    /// Anything else; re-encoded as flate-compressed samples when written
    Raster(DynamicImage),
}

/// A decoded image, ready to be embedded as an image XObject
pub struct Image {
    pub data: ImageData,
    /// Intrinsic width in pixels
    pub pixel_width: u32,
    /// Intrinsic height in pixels
    pub pixel_height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    grey: bool,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode `bytes` according to `content_type`. The input buffer is only read.
    pub fn decode(bytes: &[u8], content_type: Option<&str>) -> Result<Image, RecordError> {
        let kind = ContentType::parse(content_type)?;
        let image = image::load_from_memory_with_format(bytes, kind.format())?;

        let pixel_width = image.width();
        let pixel_height = image.height();

        let data = match (kind, image.color(), jpeg_components(bytes)) {
            (ContentType::Jpeg, ColorType::Rgb8, Some(3)) => ImageData::DirectlyEmbeddableJpeg {
                bytes: bytes.to_vec(),
                grey: false,
            },
            (ContentType::Jpeg, ColorType::L8, Some(1)) => ImageData::DirectlyEmbeddableJpeg {
                bytes: bytes.to_vec(),
                grey: true,
            },
            _ => ImageData::Raster(image),
        };

        Ok(Image {
            data,
            pixel_width,
            pixel_height,
        })
    }

    /// The intrinsic size, one unit per pixel
    pub fn size(&self) -> (Pt, Pt) {
        (Pt::from(self.pixel_width), Pt::from(self.pixel_height))
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            ImageData::DirectlyEmbeddableJpeg { bytes, grey } => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                grey: *grey,
                mask: None,
            },
            ImageData::Raster(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.to_rgba8().pixels().map(|p| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let grey = matches!(
                    image.color(),
                    ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16
                );
                let samples = if grey {
                    image.to_luma8().into_raw()
                } else {
                    image.to_rgb8().into_raw()
                };

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(&samples, level),
                    grey,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.get_or_gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.get_or_gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.pixel_width as i32);
        image.height(self.pixel_height as i32);
        if encoded.grey {
            image.color_space().device_gray();
        } else {
            image.color_space().device_rgb();
        }
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.pixel_width as i32);
            s_mask.height(self.pixel_height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

/// Number of colour components declared in a JPEG's start-of-frame header
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut i = 2;
    loop {
        if *bytes.get(i)? != 0xFF {
            return None;
        }
        let marker = *bytes.get(i + 1)?;
        match marker {
            // fill bytes
            0xFF => i += 1,
            0x01 | 0xD0..=0xD7 => i += 2,
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                // length(2) precision(1) height(2) width(2) components(1)
                return bytes.get(i + 9).copied();
            }
            0xD9 | 0xDA => return None,
            _ => {
                let len = u16::from_be_bytes([*bytes.get(i + 2)?, *bytes.get(i + 3)?]) as usize;
                i += 2 + len;
            }
        }
    }
}
