use std::fs;
use tempfile::tempdir;

use tensorframe_cli::commands::{caps, inspect};
use tensorframe_core::{
    constants::TrailerType, encoder::ContainerBuilder, ElementType, FrameRate, TensorInfo,
    TensorsConfig,
};

fn sample_container(trailer: TrailerType) -> Vec<u8> {
    let config = TensorsConfig::new(
        vec![
            TensorInfo::named("input", ElementType::Uint8, &[3, 2]).unwrap(),
            TensorInfo::named("", ElementType::Int32, &[1]).unwrap(),
        ],
        FrameRate::new(15, 1).unwrap(),
    )
    .unwrap();
    ContainerBuilder::new(&config)
        .tensor_data(&[1, 2, 3, 4, 5, 6])
        .tensor_data(&[0, 0, 0, 9])
        .trailer(trailer)
        .build()
        .unwrap()
        .to_vec()
}

#[test]
fn inspect_reports_tensors() {
    let report = inspect::inspect_bytes(sample_container(TrailerType::Crc32c), true).unwrap();

    assert_eq!(report.trailer, TrailerType::Crc32c);
    assert_eq!(report.framerate, "15/1");
    assert_eq!(report.tensors.len(), 2);
    assert_eq!(report.tensors[0].name, "input");
    assert_eq!(report.tensors[0].element_type, "uint8");
    assert_eq!(report.tensors[0].dims, "3:2");
    assert_eq!(report.tensors[0].rank, 2);
    assert_eq!(report.tensors[0].data.as_deref(), Some("010203040506"));
    assert_eq!(report.tensors[1].name, "");
    assert_eq!(report.tensors[1].bytes, 4);
}

#[test]
fn inspect_writes_json_report() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("frame.tnsf");
    let json_path = td.path().join("frame.json");
    fs::write(&in_path, sample_container(TrailerType::Blake3)).unwrap();

    inspect::execute(
        in_path.to_str().unwrap(),
        Some(json_path.to_str().unwrap()),
        false,
    )
    .unwrap();

    let report: inspect::InspectReport =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(report.trailer, TrailerType::Blake3);
    assert_eq!(report.tensors[1].element_type, "int32");
    assert!(report.tensors.iter().all(|t| t.data.is_none()));
}

#[test]
fn inspect_fails_on_corrupt_container() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("frame.tnsf");
    let mut data = sample_container(TrailerType::Crc32c);
    let last = data.len() - 5;
    data[last] ^= 0xFF;
    fs::write(&in_path, &data).unwrap();

    assert!(inspect::execute(in_path.to_str().unwrap(), None, false).is_err());
}

#[test]
fn caps_describe_partial() {
    let parsed = caps::describe(
        "other/tensors, num_tensors=(int)2, dimensions=(string)\"3:2,4\", types=(string)\"uint8,half\"",
    )
    .unwrap();
    assert!(parsed.status.has_dimension());
    assert!(parsed.failed.has_type());
    assert!(!parsed.is_fully_determined());

    assert!(caps::describe("other/tensor, rank=(int)5").is_err());
}

#[test]
fn caps_advertise_container_round_trips() {
    let advertised = caps::advertise_container(sample_container(TrailerType::None)).unwrap();
    assert!(advertised.starts_with("other/tensorframe"));

    let parsed = caps::describe(&advertised).unwrap();
    assert!(parsed.is_fully_determined());
    assert_eq!(parsed.tensors.len(), 2);
    assert_eq!(parsed.rate.unwrap().to_string(), "15/1");
}

#[test]
fn caps_requires_exactly_one_source() {
    assert!(caps::execute(None, None).is_err());
}
