//! Alcor Micro chip table
//!
//! Maps the chip id from the status response (and, for newer parts, the
//! revision byte) to commercial part names. Rows are scanned in order; one
//! chip id may appear several times with different revisions or names.
//! Names are listed without the `AU` prefix.

use chipinfo_core::chip::ChipSignature;

/// Prefix of every Alcor Micro part name
pub const NAME_PREFIX: &str = "AU";

/// Known Alcor Micro controllers
#[rustfmt::skip]
pub const ALCOR_CHIPS: &[ChipSignature] = &[
    // from older vendor tools
    ChipSignature::new(0x0C0E, 0, &["9386"]),
    ChipSignature::new(0xAC43, 0, &["9387"]),
    ChipSignature::new(0xAA06, 0, &["6386/89"]),
    ChipSignature::new(0xAB41, 0, &["6980"]), // reported as 6981 by newer tools
    ChipSignature::new(0xAB42, 0, &["6981"]),
    ChipSignature::new(0xAE41, 0, &["6982"]),
    // from newer vendor tools
    ChipSignature::new(0xAC43, 0, &["9387"]),
    ChipSignature::new(0xAB41, 0, &["6981"]),
    ChipSignature::new(0xAB42, 0, &["6981"]),
    ChipSignature::new(0xAB43, 0, &["6981"]),
    ChipSignature::new(0xAE41, 0, &["6982"]),
    ChipSignature::new(0xAE42, 0, &["6982"]),
    ChipSignature::new(0xBA01, 1, &["6983"]),
    ChipSignature::new(0xBB06, 1, &["6984"]),
    ChipSignature::new(0xBB07, 1, &["6984"]),
    ChipSignature::new(0xBB09, 1, &["6984"]),
    ChipSignature::new(0xBC01, 2, &["6983", "6986"]),
    ChipSignature::new(0xBC07, 2, &["6983", "6986"]),
    ChipSignature::new(0xBD01, 2, &["6983", "6986"]),
    ChipSignature::new(0xBD02, 2, &["6983", "6986"]),
    ChipSignature::new(0xBD03, 2, &["6983", "6986"]),
    ChipSignature::new(0xBD04, 2, &["6983", "6986"]),
    ChipSignature::new(0xBD05, 2, &["6983", "6986"]).rev(0x08),
    ChipSignature::new(0xBD06, 2, &["6983", "6986"]).rev(0x08),
    ChipSignature::new(0xBD06, 2, &["6983", "6986"]).rev(0x0C),
    ChipSignature::new(0xCA01, 5, &["6987", "6990"]).rev(0x00),
    ChipSignature::new(0xCA02, 5, &["6987", "6990"]).rev(0x00),
    ChipSignature::new(0xCA03, 5, &["6987", "6990"]).rev(0x00),
    ChipSignature::new(0xCA03, 5, &["6987", "6990"]).rev(0x10),
    ChipSignature::new(0xCA03, 5, &["6987", "6990"]).rev(0x20),
    ChipSignature::new(0xCA03, 5, &["6987", "6990"]).rev(0x40),
    ChipSignature::new(0xCA03, 5, &["6987", "6990"]).rev(0xC0),
    ChipSignature::new(0xCA04, 5, &["6987", "6990"]).rev(0xC0),
    ChipSignature::new(0xCA05, 5, &["6987", "6990"]).rev(0xC0),
    ChipSignature::new(0xCA06, 5, &["6987", "6990"]).rev(0x00),
    ChipSignature::new(0xCA07, 5, &["6987", "6990"]).rev(0x00),
    ChipSignature::new(0xCA07, 5, &["6987", "6990"]).rev(0x40),
    ChipSignature::new(0xCA09, 5, &["6987AN", "6991"]).rev(0x00),
    ChipSignature::new(0xCA09, 5, &["6987AN", "6991"]).rev(0x10),
    ChipSignature::new(0xCA09, 5, &["6987AN", "6991"]).rev(0x20),
    ChipSignature::new(0xCA09, 5, &["6987AN", "6991"]).rev(0x40),
    ChipSignature::new(0xCA09, 5, &["6987AN", "6991"]).rev(0xC0),
    ChipSignature::new(0xD002, 3, &["6985", "6992"]).rev(0x0F),
    ChipSignature::new(0xD003, 3, &["6985", "6992"]).rev(0x0F),
    ChipSignature::new(0xD004, 3, &["6985", "6992"]).rev(0x0F),
    ChipSignature::new(0xD004, 3, &["6985", "6992"]).rev(0x4F),
    ChipSignature::new(0xD005, 3, &["6985", "6992"]).rev(0x0F),
    ChipSignature::new(0xD005, 3, &["6985", "6992"]).rev(0x4F),
    ChipSignature::new(0xD203, 4, &["6985B", "6996"]).rev(0x0F),
    ChipSignature::new(0xD203, 4, &["6985B", "6996"]).rev(0x4F),
    ChipSignature::new(0xD403, 4, &["6985B", "6996"]).rev(0x0F),
    ChipSignature::new(0xD403, 4, &["6985B", "6996"]).rev(0x4F),
    ChipSignature::new(0xCD03, 8, &["6989", "6998"]).rev(0x80),
    ChipSignature::new(0xCD03, 8, &["6989", "6998"]).rev(0xC0),
    ChipSignature::new(0xCB04, 6, &["6987T", "6990T"]).rev(0x80),
    ChipSignature::new(0xCB04, 6, &["6987T", "6990T"]).rev(0xC0),
    ChipSignature::new(0xCB05, 6, &["6987T", "6990T"]).rev(0x80),
    ChipSignature::new(0xCB05, 6, &["6987T", "6990T"]).rev(0xC0),
    ChipSignature::new(0xCB06, 6, &["6987T", "6990T"]).rev(0x80),
    ChipSignature::new(0xCB06, 6, &["6987T", "6990T"]).rev(0xC0),
    ChipSignature::new(0xCC01, 7, &["6989NL", "6998NL"]).rev(0x80),
    ChipSignature::new(0xCC01, 7, &["6989NL", "6998NL"]).rev(0xC0),
    ChipSignature::new(0xCF02, 8, &["6989N", "6998N"]).rev(0x80),
    ChipSignature::new(0xCF02, 8, &["6989N", "6998N"]).rev(0xC0),
    ChipSignature::new(0xCF02, 8, &["6989NL", "6998NL"]).rev(0x81),
    ChipSignature::new(0xCF02, 8, &["6989NL", "6998NL"]).rev(0xC1),
    ChipSignature::new(0xCE01, 6, &["6989L", "6998L"]).rev(0x80),
    ChipSignature::new(0xCE01, 6, &["6989L", "6998L"]).rev(0xC0),
    ChipSignature::new(0xCE02, 6, &["6989L", "6998L"]).rev(0x80),
    ChipSignature::new(0xCE02, 6, &["6989L", "6998L"]).rev(0xC0),
    ChipSignature::new(0xE001, 8, &["6989", "6998"]).rev(0x80),
    ChipSignature::new(0xE001, 8, &["6989", "6998"]).rev(0xC0),
    ChipSignature::new(0xE203, 8, &["6989", "6998"]).rev(0x80),
    ChipSignature::new(0xE203, 8, &["6989", "6998"]).rev(0xC0),
    ChipSignature::new(0xE204, 8, &["6989", "6998"]).rev(0x80),
    ChipSignature::new(0xE204, 8, &["6989", "6998"]).rev(0xC0),
    ChipSignature::new(0xE101, 8, &["6989N", "6998N"]).rev(0x80),
    ChipSignature::new(0xE101, 8, &["6989N", "6998N"]).rev(0xC0),
    ChipSignature::new(0xE102, 8, &["6989N", "6998N"]).rev(0x80),
    ChipSignature::new(0xE102, 8, &["6989N", "6998N"]).rev(0xC0),
    ChipSignature::new(0xE103, 8, &["6989N", "6998N"]).rev(0x80),
    ChipSignature::new(0xE103, 8, &["6989N", "6998N"]).rev(0xC0),
    ChipSignature::new(0xE302, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0xFF13EA50),
    ChipSignature::new(0xE302, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0xF013EA50),
    ChipSignature::new(0xE302, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x0F13EA50),
    ChipSignature::new(0xE302, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0xFFFFFFFF),
    ChipSignature::new(0xE302, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x0013EA50),
    ChipSignature::new(0xE302, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0xF012CA50),
    ChipSignature::new(0xE302, 8, &["6989ANL", "6998ANL"]).rev(0x80).otp(0x1F12CA50),
    ChipSignature::new(0xE302, 8, &["6989ANL", "6998ANL"]).rev(0x80).otp(0x1012CA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x0F13EA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0xFFFFFFFF),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x0013EA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0xF012CA50),
    ChipSignature::new(0xE304, 8, &["6989ANL", "6998ANL"]).rev(0x80).otp(0x1F12CA50),
    ChipSignature::new(0xE304, 8, &["6989ANL", "6998ANL"]).rev(0x80).otp(0x1012CA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0xF052CA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x2F12CA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x2F92CA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x2012CA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x2092CA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x3F12CA50),
    ChipSignature::new(0xE304, 8, &["6989AN", "6998AN"]).rev(0x80).otp(0x3012CA50),
    ChipSignature::new(0xE509, 9, &["6989SN", "6998SN"]).rev(0x80),
    ChipSignature::new(0xE509, 9, &["6989SN", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xE50B, 9, &["6989SN", "6998SN"]).rev(0x80),
    ChipSignature::new(0xE50B, 9, &["6989SN", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xE50B, 9, &["6989ANL", "6998ANL"]).rev(0x88),
    ChipSignature::new(0xE50B, 9, &["6989ANL", "6998ANL"]).rev(0xC8),
    ChipSignature::new(0xE50E, 9, &["6989SN", "6998SN"]).rev(0x80),
    ChipSignature::new(0xE50E, 9, &["6989SN", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xE50E, 9, &["6989SN", "6998SN"]).rev(0xE0),
    ChipSignature::new(0xE512, 9, &["6989SN", "6998SN"]).rev(0x80),
    ChipSignature::new(0xE512, 9, &["6989SN", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xE512, 9, &["6989SN", "6998SN"]).rev(0xE0),
    ChipSignature::new(0xE602, 8, &["6989AN", "6998AN"]).rev(0x80),
    ChipSignature::new(0xE602, 8, &["6989AN", "6998AN"]).rev(0xC0),
    ChipSignature::new(0xE602, 8, &["6989AN", "6998AN"]).rev(0xE0),
    ChipSignature::new(0xE603, 8, &["6989AN", "6998AN"]).rev(0x80),
    ChipSignature::new(0xE603, 8, &["6989AN", "6998AN"]).rev(0xC0),
    ChipSignature::new(0xE603, 8, &["6989AN", "6998AN"]).rev(0xE0),
    ChipSignature::new(0xE802, 9, &["6989SN", "6998SN"]).rev(0x80).otp(0xFF13EA50),
    ChipSignature::new(0xE802, 9, &["6989SN", "6998SN"]).rev(0x80).otp(0xF013EA50),
    ChipSignature::new(0xEB02, 9, &["6989SN", "6998SN"]).rev(0x80),
    ChipSignature::new(0xEC05, 11, &["6989SN-GT", "6998SN"]).rev(0x80),
    ChipSignature::new(0xEC05, 11, &["6989SN-GT", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xEC05, 11, &["6989SN-GT", "6998SN"]).rev(0xE0),
    ChipSignature::new(0xEC07, 11, &["6989SN-GT", "6998SN"]).rev(0x80),
    ChipSignature::new(0xEC07, 11, &["6989SN-GT", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xEF00, 12, &["6989SNL", "6998SNL"]).rev(0x80),
    ChipSignature::new(0xEF01, 12, &["6989SNL", "6998SNL"]).rev(0x80),
    ChipSignature::new(0xEF01, 12, &["6989SNM", "6998SNM"]).rev(0xCC),
    ChipSignature::new(0xEF01, 12, &["6989SN-GTA", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xEF01, 12, &["6989SN-GTA", "6998SN"]).rev(0xE0),
    ChipSignature::new(0xEF01, 12, &["6989SN-GTA", "6998SN"]).rev(0x8C),
    ChipSignature::new(0xEF01, 12, &["6989SNM", "6998SNM"]).rev(0x8E),
    ChipSignature::new(0xF101, 13, &["6989SNL-B", "6998SNL"]).rev(0x00),
    ChipSignature::new(0xF101, 13, &["6989SNL-B", "6998SNL"]).rev(0x80),
    ChipSignature::new(0xF101, 13, &["6989SNL-B", "6998SNL"]).rev(0xC0),
    ChipSignature::new(0xF204, 14, &["6989SN-GTB", "6998SN"]).rev(0x00),
    ChipSignature::new(0xF204, 14, &["6989SN-GTB", "6998SN"]).rev(0x80),
    ChipSignature::new(0xF204, 14, &["6989SN-GTB", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xF206, 14, &["6989SN-GTB", "6998SN"]).rev(0xC1),
    ChipSignature::new(0xF206, 14, &["6989SN-GTB", "6998SN"]).rev(0x80),
    ChipSignature::new(0xF206, 14, &["6989SN-GTB", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xF500, 15, &["6989SN-GTC", "6998SN"]).rev(0x00),
    ChipSignature::new(0xF500, 15, &["6989SN-GTC", "6998SN"]).rev(0x81),
    ChipSignature::new(0xF500, 15, &["6989SN-GTC", "6998SN"]).rev(0x80),
    ChipSignature::new(0xF500, 15, &["6989SN-GTC", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xF500, 15, &["6989SN-GTC", "6998SN"]).rev(0xC1),
    ChipSignature::new(0xF502, 15, &["6989SN-GTC", "6998SN"]).rev(0x00),
    ChipSignature::new(0xF502, 15, &["6989SN-GTC", "6998SN"]).rev(0x81),
    ChipSignature::new(0xF502, 15, &["6989SN-GTC", "6998SN"]).rev(0x80),
    ChipSignature::new(0xF502, 15, &["6989SN-GTC", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xF502, 15, &["6989SN-GTC", "6998SN"]).rev(0xC1),
    ChipSignature::new(0xF700, 15, &["6989SN-GTD", "6998SN"]).rev(0x00),
    ChipSignature::new(0xF700, 15, &["6989SN-GTD", "6998SN"]).rev(0x80),
    ChipSignature::new(0xF700, 15, &["6989SN-GTD", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xF700, 15, &["6989SN-GTD", "6998SN"]).rev(0xC3),
    ChipSignature::new(0xF800, 15, &["6989SN-GTE", "6998SN"]).rev(0x00),
    ChipSignature::new(0xF800, 15, &["6989SN-GTE", "6998SN"]).rev(0x80),
    ChipSignature::new(0xF800, 15, &["6989SN-GTE", "6998SN"]).rev(0xC0),
    ChipSignature::new(0xF900, 15, &["6989SN-GTF", "6998SN"]).rev(0x80),
    ChipSignature::new(0xFA00, 15, &["6989SN-GTF", "6998SN"]).rev(0x80),
    // engineering sample without a part number, rendered as a single AU???
    ChipSignature::new(0xF000, 10, &["???"]).rev(0x00),
];
