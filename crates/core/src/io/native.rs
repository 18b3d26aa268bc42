//! Native GeoTIFF reading/writing
//!
//! Uses the `tiff` crate for TIFF I/O plus the GeoTIFF tags needed to
//! round-trip classified scenes and water masks: pixel scale, tiepoint,
//! geokey directory and the GDAL no-data convention.

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster, RasterElement};
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray8, Gray32Float};
use tiff::encoder::{DirectoryEncoder, TiffEncoder, TiffKind};
use tiff::tags::Tag;

// GeoKey ids
const KEY_MODEL_TYPE: u16 = 1024;
const KEY_RASTER_TYPE: u16 = 1025;
const KEY_GEOGRAPHIC_TYPE: u16 = 2048;
const KEY_PROJECTED_CS_TYPE: u16 = 3072;

/// Read a GeoTIFF file into a Raster
///
/// Reads the first image in the file. Georeferencing, CRS and no-data
/// metadata are recovered when the corresponding tags are present.
pub fn read_geotiff<T, P>(path: P) -> Result<Raster<T>>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    decode_geotiff(file)
}

/// Read a GeoTIFF from an in-memory buffer into a Raster
///
/// Same as `read_geotiff` but operates on a byte slice instead of a file
/// path, for scenes that arrive over the network or live in a test.
pub fn read_geotiff_from_buffer<T>(data: &[u8]) -> Result<Raster<T>>
where
    T: RasterElement,
{
    decode_geotiff(Cursor::new(data))
}

/// Internal: decode a GeoTIFF from any `Read + Seek` source
fn decode_geotiff<T, R>(reader: R) -> Result<Raster<T>>
where
    T: RasterElement,
    R: std::io::Read + std::io::Seek,
{
    let mut decoder =
        Decoder::new(reader).map_err(|e| Error::Other(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Other(format!("Cannot read dimensions: {}", e)))?;

    let rows = height as usize;
    let cols = width as usize;

    // Read image data
    let result = decoder
        .read_image()
        .map_err(|e| Error::Other(format!("Cannot read image data: {}", e)))?;

    let data: Vec<T> = match result {
        DecodingResult::F32(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::F64(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::U8(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::U16(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::U32(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::I8(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::I16(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::I32(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        _ => {
            return Err(Error::UnsupportedDataType(
                "Unsupported TIFF pixel format".to_string(),
            ));
        }
    };

    if data.len() != rows * cols {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let mut raster = Raster::from_vec(data, rows, cols)?;

    if let Ok(transform) = read_geotransform(&mut decoder) {
        raster.set_transform(transform);
    }
    if let Some(crs) = read_crs(&mut decoder) {
        raster.set_crs(Some(crs));
    }
    if let Some(nodata) = read_nodata(&mut decoder) {
        raster.set_nodata(num_traits::cast(nodata));
    }

    Ok(raster)
}

/// Attempt to read GeoTransform from TIFF tags
fn read_geotransform<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
) -> Result<GeoTransform> {
    let scale = decoder
        .get_tag_f64_vec(Tag::ModelPixelScaleTag)
        .map_err(|_| Error::Other("No pixel scale tag".into()))?;

    let tiepoint = decoder
        .get_tag_f64_vec(Tag::ModelTiepointTag)
        .map_err(|_| Error::Other("No tiepoint tag".into()))?;

    if scale.len() >= 2 && tiepoint.len() >= 6 {
        // tiepoint: [I, J, K, X, Y, Z]
        // scale: [ScaleX, ScaleY, ScaleZ]
        let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
        let origin_y = tiepoint[4] + tiepoint[1] * scale[1];
        let pixel_width = scale[0];
        let pixel_height = -scale[1]; // Negative for north-up

        return Ok(GeoTransform::new(
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        ));
    }

    Err(Error::Other("Cannot determine geotransform".into()))
}

/// Attempt to read an EPSG code from the geokey directory
fn read_crs<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<CRS> {
    let directory = decoder
        .get_tag(Tag::GeoKeyDirectoryTag)
        .ok()?
        .into_u32_vec()
        .ok()?;

    if directory.len() < 4 {
        return None;
    }

    let mut geographic = None;
    let mut projected = None;

    // Entries are [key_id, tag_location, count, value]; location 0 means
    // the value is stored inline. 32767 is "user defined".
    for entry in directory[4..].chunks_exact(4) {
        if entry[1] != 0 || entry[3] == 32767 {
            continue;
        }
        match entry[0] as u16 {
            KEY_GEOGRAPHIC_TYPE => geographic = Some(entry[3]),
            KEY_PROJECTED_CS_TYPE => projected = Some(entry[3]),
            _ => {}
        }
    }

    // Projected files also carry the geographic key of their datum
    projected.or(geographic).map(CRS::from_epsg)
}

/// Attempt to read a no-data value from the GDAL_NODATA ascii tag
fn read_nodata<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
    let text = decoder
        .get_tag_ascii_string(Tag::GdalNodata)
        .ok()?;
    text.trim_end_matches('\0').trim().parse().ok()
}

/// Write a Raster to a GeoTIFF file
///
/// Integer rasters (masks, class grids) are written as 8-bit grayscale,
/// floating point rasters as 32-bit float.
pub fn write_geotiff<T, P>(raster: &Raster<T>, path: P) -> Result<()>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    encode_geotiff(raster, file)
}

/// Write a Raster to an in-memory GeoTIFF buffer
///
/// Same as `write_geotiff` but returns the encoded bytes instead of
/// writing to a file.
pub fn write_geotiff_to_buffer<T>(raster: &Raster<T>) -> Result<Vec<u8>>
where
    T: RasterElement,
{
    let mut buf = Vec::new();
    encode_geotiff(raster, Cursor::new(&mut buf))?;
    Ok(buf)
}

/// Internal: encode a Raster as GeoTIFF into any `Write + Seek` sink
fn encode_geotiff<T, W>(raster: &Raster<T>, writer: W) -> Result<()>
where
    T: RasterElement,
    W: std::io::Write + std::io::Seek,
{
    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    let (rows, cols) = raster.shape();

    if T::is_float() {
        let data: Vec<f32> = raster
            .data()
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(f32::NAN))
            .collect();

        let mut image = encoder
            .new_image::<Gray32Float>(cols as u32, rows as u32)
            .map_err(|e| Error::Other(format!("Cannot create TIFF image: {}", e)))?;
        write_geo_tags(image.encoder(), raster)?;
        image
            .write_data(&data)
            .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;
    } else {
        let data: Vec<u8> = raster
            .data()
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(0))
            .collect();

        let mut image = encoder
            .new_image::<Gray8>(cols as u32, rows as u32)
            .map_err(|e| Error::Other(format!("Cannot create TIFF image: {}", e)))?;
        write_geo_tags(image.encoder(), raster)?;
        image
            .write_data(&data)
            .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;
    }

    Ok(())
}

/// Write georeferencing, geokey and no-data tags for a raster
fn write_geo_tags<T, W, K>(dir: &mut DirectoryEncoder<'_, W, K>, raster: &Raster<T>) -> Result<()>
where
    T: RasterElement,
    W: std::io::Write + std::io::Seek,
    K: TiffKind,
{
    let gt = raster.transform();

    // ModelPixelScaleTag
    let scale = vec![gt.pixel_width, gt.pixel_height.abs(), 0.0];
    dir.write_tag(Tag::ModelPixelScaleTag, scale.as_slice())
        .map_err(|e| Error::Other(format!("Cannot write scale tag: {}", e)))?;

    // ModelTiepointTag
    let tiepoint = vec![0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
    dir.write_tag(Tag::ModelTiepointTag, tiepoint.as_slice())
        .map_err(|e| Error::Other(format!("Cannot write tiepoint tag: {}", e)))?;

    // GeoKeyDirectoryTag. GTModelTypeGeoKey 1 = projected, 2 = geographic;
    // GTRasterTypeGeoKey 1 = RasterPixelIsArea. The EPSG code goes in
    // GeographicTypeGeoKey or ProjectedCSTypeGeoKey accordingly.
    let geographic = raster.crs().map(|c| c.is_geographic()).unwrap_or(false);
    let mut entries: Vec<[u16; 4]> = vec![
        [KEY_MODEL_TYPE, 0, 1, if geographic { 2 } else { 1 }],
        [KEY_RASTER_TYPE, 0, 1, 1],
    ];
    if let Some(code) = raster.crs().and_then(|c| c.epsg()) {
        let key = if geographic {
            KEY_GEOGRAPHIC_TYPE
        } else {
            KEY_PROJECTED_CS_TYPE
        };
        entries.push([key, 0, 1, code as u16]);
    }

    let mut geokeys: Vec<u16> = vec![1, 1, 0, entries.len() as u16];
    for entry in &entries {
        geokeys.extend_from_slice(entry);
    }
    dir.write_tag(Tag::GeoKeyDirectoryTag, geokeys.as_slice())
        .map_err(|e| Error::Other(format!("Cannot write geokey tag: {}", e)))?;

    // GDAL_NODATA
    if let Some(nodata) = raster.nodata().and_then(|nd| nd.to_f64()) {
        let text = format!("{}", nodata);
        dir.write_tag(Tag::GdalNodata, text.as_str())
            .map_err(|e| Error::Other(format!("Cannot write nodata tag: {}", e)))?;
    }

    Ok(())
}
