#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

/// Write a BMP image. The extension does not matter: dimension reads sniff
/// the header, so `page-1.jpg` holding BMP bytes is fine for tests.
pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// A PAGE 2013 document with one region holding one line.
pub fn page_xml(width: u32, height: u32, region_points: &str, line_text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2013-07-15">
  <Metadata><Creator>tests</Creator></Metadata>
  <Page imageFilename="scan.tif" imageWidth="{width}" imageHeight="{height}">
    <TextRegion id="r1">
      <Coords points="{region_points}"/>
      <TextLine id="r1l1">
        <Coords points="10,10 20,10 20,20 10,20"/>
        <TextEquiv><Unicode>{line_text}</Unicode></TextEquiv>
      </TextLine>
    </TextRegion>
  </Page>
</PcGts>
"#
    )
}

/// Paths of a newspaper collection laid out as `<root>/<paper>/xml` (PAGE
/// files and manifests) and `<root>/<paper>/images`.
pub struct Collection {
    pub root: PathBuf,
    pub xml_dir: PathBuf,
    pub images_dir: PathBuf,
}

pub fn collection(root: &Path, paper: &str) -> Collection {
    let xml_dir = root.join(paper).join("xml");
    let images_dir = root.join(paper).join("images");
    fs::create_dir_all(&xml_dir).expect("create xml dir");
    fs::create_dir_all(&images_dir).expect("create images dir");
    Collection {
        root: root.to_path_buf(),
        xml_dir,
        images_dir,
    }
}

impl Collection {
    pub fn add_manifest(&self, issue_id: &str) {
        fs::write(self.xml_dir.join(format!("{issue_id}.pdf")), b"%PDF-1.4\n")
            .expect("write manifest");
    }

    pub fn add_page(&self, issue_id: &str, page: u32, xml: &str) {
        fs::write(self.xml_dir.join(format!("{issue_id}_P{page}.xml")), xml)
            .expect("write page xml");
    }

    pub fn add_image(&self, issue_id: &str, page: u32, width: u32, height: u32) {
        write_bmp(
            &self.images_dir.join(format!("{issue_id}_page-{page}.jpg")),
            width,
            height,
        );
    }

    pub fn output(&self, issue_id: &str) -> PathBuf {
        self.xml_dir.join(format!("{issue_id}_osd.json"))
    }
}
