use crate::bmod::BmodError;
use crate::bmod::bytes::Cursor;

#[test]
fn reads_little_endian_scalars_and_vectors() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&0xBEEF_u16.to_le_bytes());
	bytes.extend_from_slice(&7_u32.to_le_bytes());
	bytes.extend_from_slice(&(-1_i32).to_le_bytes());
	for value in [1.0_f32, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0] {
		bytes.extend_from_slice(&value.to_le_bytes());
	}

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_u16_le().expect("u16"), 0xBEEF);
	assert_eq!(cursor.read_u32_le().expect("u32"), 7);
	assert_eq!(cursor.read_i32_le().expect("i32"), -1);
	let v = cursor.read_vec3().expect("vec3");
	assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
	let q = cursor.read_quat().expect("quat");
	assert_eq!(q.to_array(), [0.0, 0.0, 0.0, 1.0]);
	assert_eq!(cursor.remaining(), 0);
}

#[test]
fn fixed_string_trims_trailing_nuls_only() {
	let bytes = b"AB\0C\0\0\0";
	let mut cursor = Cursor::new(bytes);
	assert_eq!(cursor.read_string(7).expect("string"), "AB\0C");
}

#[test]
fn non_ascii_bytes_become_question_marks() {
	let bytes = [b'a', 0xE9, b'b'];
	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_string(3).expect("string"), "a?b");
}

#[test]
fn short_read_reports_offset_and_shortfall() {
	let bytes = [1_u8, 2, 3];
	let mut cursor = Cursor::new(&bytes);
	cursor.skip(1).expect("skip");
	let err = cursor.read_u32_le().expect_err("only two bytes remain");
	assert!(matches!(err, BmodError::UnexpectedEof { at: 1, need: 4, rem: 2 }));
	assert_eq!(cursor.pos(), 1, "failed read must not advance");
}

#[test]
fn bounded_cursor_stops_at_its_own_end() {
	let bytes = [0_u8; 16];
	let mut outer = Cursor::new(&bytes);
	outer.skip(4).expect("skip");

	let mut inner = outer.bounded(8);
	assert_eq!(inner.pos(), 4);
	assert_eq!(inner.remaining(), 4);
	inner.read_u32_le().expect("fits");
	assert!(inner.read_u16_le().is_err());

	let wide = outer.bounded(64);
	assert_eq!(wide.end(), 16, "bound is clamped to the parent");
}
