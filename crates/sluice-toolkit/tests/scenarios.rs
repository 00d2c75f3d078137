//! Integration test: toolkit calls against the sample network through a
//! full open → start → step → end lifecycle.

use sluice_core::{ActionSource, FlowUnits, LinkType, NodeType, ObjectKind, ToolkitError};
use sluice_test_utils::fixtures::{LINK_IDS, NODE_IDS, SELF_LOADING, SUBCATCH_IDS};
use sluice_test_utils::{audited_network, init_tracing, sample_network, storm_network};
use sluice_toolkit::{
    analysis_setting, count_objects, current_datetime, link_connections, link_param,
    link_result, link_type, node_param, node_result, node_type, object_id, set_link_setting,
    set_node_inflow, simulation_datetime, simulation_param, simulation_unit,
    subcatch_out_connection, subcatch_param, subcatch_result, LinkParam, LinkResult, NodeParam,
    NodeResult, SimulationParam, SubcatchParam, SubcatchResult,
};

// ── Phases ───────────────────────────────────────────────────────────

#[test]
fn open_project_serves_params_but_not_results() {
    init_tracing();
    let p = sample_network(FlowUnits::Cfs);
    assert_eq!(node_param(&p, 0, NodeParam::InvertElev.code()), Ok(100.0));
    assert_eq!(
        node_result(&p, 0, NodeResult::Inflow.code()),
        Err(ToolkitError::NotStarted)
    );
}

#[test]
fn ended_run_keeps_objects_addressable() {
    let mut p = sample_network(FlowUnits::Cfs);
    p.start().unwrap();
    p.step().unwrap();
    p.end().unwrap();
    assert_eq!(object_id(&p, ObjectKind::Link.code(), 3), Ok("P1"));
    assert_eq!(link_param(&p, 0, LinkParam::InitFlow.code()), Ok(1.0));
    assert_eq!(link_result(&p, 0, 0), Err(ToolkitError::NotStarted));
    assert_eq!(set_node_inflow(&mut p, 0, 1.0), Err(ToolkitError::NotStarted));
}

#[test]
fn closed_project_rejects_everything_but_counts() {
    let mut p = sample_network(FlowUnits::Cfs);
    p.close();
    assert_eq!(count_objects(&p, ObjectKind::Node.code()), Ok(0));
    assert_eq!(object_id(&p, ObjectKind::Node.code(), 0), Err(ToolkitError::NotOpen));
    assert_eq!(node_type(&p, 0), Err(ToolkitError::NotOpen));
    assert_eq!(simulation_unit(&p, 0), Err(ToolkitError::NotOpen));
}

// ── Catalog and structure ────────────────────────────────────────────

#[test]
fn catalog_matches_fixture() {
    let p = sample_network(FlowUnits::Cfs);
    assert_eq!(count_objects(&p, ObjectKind::Node.code()), Ok(NODE_IDS.len()));
    assert_eq!(count_objects(&p, ObjectKind::Link.code()), Ok(LINK_IDS.len()));
    for (i, id) in LINK_IDS.iter().enumerate() {
        assert_eq!(object_id(&p, ObjectKind::Link.code(), i as i32), Ok(*id));
    }
    assert_eq!(object_id(&p, ObjectKind::Pollutant.code(), 0), Ok("TSS"));
    assert_eq!(count_objects(&p, ObjectKind::TimeSeries.code()), Ok(1));
    assert_eq!(
        object_id(&p, ObjectKind::TimeSeries.code(), 0),
        Err(ToolkitError::UnknownKind {
            code: ObjectKind::TimeSeries.code()
        })
    );
}

#[test]
fn structure_queries() {
    let p = sample_network(FlowUnits::Cfs);
    assert_eq!(node_type(&p, 3), Ok(NodeType::Storage));
    assert_eq!(node_type(&p, 5), Ok(NodeType::Outfall));
    assert_eq!(link_type(&p, 4), Ok(LinkType::Orifice));
    assert_eq!(link_type(&p, 6), Ok(LinkType::Outlet));
    assert_eq!(link_connections(&p, 3), Ok((3, 4)));
}

#[test]
fn subcatchment_outlets() {
    let p = sample_network(FlowUnits::Cfs);
    assert_eq!(subcatch_out_connection(&p, 0), Ok((ObjectKind::Node, 0)));
    assert_eq!(
        subcatch_out_connection(&p, 1),
        Ok((ObjectKind::Subcatchment, 0))
    );
    assert_eq!(
        subcatch_out_connection(&p, SELF_LOADING as i32),
        Ok((ObjectKind::Subcatchment, SELF_LOADING))
    );
    assert_eq!(SUBCATCH_IDS[SELF_LOADING], "S3");
}

// ── Dispatch ─────────────────────────────────────────────────────────

#[test]
fn link_result_codes_and_flow_scaling() {
    let mut p = sample_network(FlowUnits::Cms);
    p.start().unwrap();
    for _ in 0..3 {
        p.step().unwrap();
    }
    assert_eq!(
        link_result(&p, 2, 99),
        Err(ToolkitError::UnknownParameter {
            kind: ObjectKind::Link,
            code: 99
        })
    );
    let internal = p.links()[2].new_flow;
    assert!(internal > 0.0);
    let flow = link_result(&p, 2, LinkResult::Flow.code()).unwrap();
    assert!((flow - internal * 0.02832).abs() < 1e-12);
}

#[test]
fn metric_params_convert_areas_and_lengths() {
    let p = sample_network(FlowUnits::Lps);
    let area = node_param(&p, 3, NodeParam::PondedArea.code()).unwrap();
    assert!((area - 500.0 * 0.3048 * 0.3048).abs() < 1e-9);
    let hectares = subcatch_param(&p, 0, SubcatchParam::Area.code()).unwrap();
    assert!((hectares - 217_800.0 * 0.92903e-5).abs() < 1e-9);
    assert_eq!(subcatch_param(&p, 0, SubcatchParam::Slope.code()), Ok(0.01));
    assert_eq!(link_param(&p, 0, LinkParam::OutletLoss.code()), Ok(1.0));
}

#[test]
fn subcatchment_results_convert_in_both_unit_systems() {
    // [US, SI] factors per category; flows scale with the flow units.
    let rate = [43_200.0, 1_097_280.0];
    let evap = [1_036_800.0, 26_334_720.0];
    let depth = [12.0, 304.8];

    for (units, sys) in [(FlowUnits::Cfs, 0), (FlowUnits::Cms, 1)] {
        let mut p = storm_network(units);
        p.start().unwrap();
        p.step().unwrap();
        p.step().unwrap();

        let s1 = &p.subcatchments()[0];
        for raw in [
            s1.rainfall,
            s1.evap_loss,
            s1.infil_loss,
            s1.runon,
            s1.new_runoff,
            s1.new_snow_depth,
        ] {
            assert!(raw > 0.0, "S1 state should be wet under the design storm");
        }

        let flow = units.factor();
        for (i, sc) in p.subcatchments().iter().enumerate() {
            let expected = [
                (SubcatchResult::Rainfall, sc.rainfall * rate[sys]),
                (SubcatchResult::EvapLoss, sc.evap_loss * evap[sys]),
                (SubcatchResult::InfilLoss, sc.infil_loss * rate[sys]),
                (SubcatchResult::Runon, sc.runon * flow),
                (SubcatchResult::Runoff, sc.new_runoff * flow),
                (SubcatchResult::SnowDepth, sc.new_snow_depth * depth[sys]),
            ];
            for (result, want) in expected {
                let got = subcatch_result(&p, i as i32, result.code()).unwrap();
                assert!(
                    (got - want).abs() <= 1e-12 * want.abs(),
                    "{:?} of {}: {got} != {want}",
                    result,
                    SUBCATCH_IDS[i]
                );
            }
        }

        let rain = subcatch_result(&p, 0, SubcatchResult::Rainfall.code()).unwrap();
        let want = [0.864, 21.9456][sys];
        assert!((rain - want).abs() < 1e-9, "{rain}");
        assert!(matches!(
            subcatch_result(&p, 1, 6),
            Err(ToolkitError::UnknownParameter {
                kind: ObjectKind::Subcatchment,
                ..
            })
        ));
    }
}

#[test]
fn dry_subcatchments_report_zero_runoff() {
    let mut p = sample_network(FlowUnits::Cfs);
    p.start().unwrap();
    p.step().unwrap();
    assert_eq!(subcatch_result(&p, 0, SubcatchResult::Runoff.code()), Ok(0.0));
}

// ── Overrides ────────────────────────────────────────────────────────

#[test]
fn audited_setting_change_writes_one_record() {
    let (mut p, sink) = audited_network(FlowUnits::Cfs);
    p.start().unwrap();
    p.step().unwrap();
    p.step().unwrap();
    let now = p.current_datetime();

    set_link_setting(&mut p, 5, 0.5).unwrap();

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].link_id, LINK_IDS[5]);
    assert_eq!(records[0].setting, 0.5);
    assert_eq!(records[0].time, now);
    assert_eq!(records[0].source, ActionSource::Toolkit);
    assert_eq!(records[0].source.to_string(), "ToolkitAPI");
    assert_eq!(link_result(&p, 5, LinkResult::Setting.code()), Ok(0.5));
}

#[test]
fn repeated_setting_is_idempotent() {
    let mut p = sample_network(FlowUnits::Cfs);
    p.start().unwrap();
    set_link_setting(&mut p, 4, 0.3).unwrap();
    let first = (p.links()[4].target_setting, p.links()[4].setting);
    set_link_setting(&mut p, 4, 0.3).unwrap();
    let second = (p.links()[4].target_setting, p.links()[4].setting);
    assert_eq!(first, second);
    assert_eq!(first, (0.3, 0.3));
}

#[test]
fn out_of_range_setting_values_are_forwarded() {
    let mut p = sample_network(FlowUnits::Cfs);
    p.start().unwrap();
    set_link_setting(&mut p, 0, 1.7).unwrap();
    assert_eq!(link_result(&p, 0, LinkResult::TargetSetting.code()), Ok(1.7));
    set_node_inflow(&mut p, 0, -2.0).unwrap();
    assert_eq!(p.nodes()[0].ext_inflow.as_ref().unwrap().latched, -2.0);
}

#[test]
fn inflow_latches_across_steps() {
    let mut p = sample_network(FlowUnits::Cfs);
    p.start().unwrap();
    let lateral = NodeResult::LateralInflow.code();

    set_node_inflow(&mut p, 0, 3.0).unwrap();
    p.step().unwrap();
    assert_eq!(node_result(&p, 0, lateral), Ok(3.0));
    p.step().unwrap();
    assert_eq!(node_result(&p, 0, lateral), Ok(3.0));

    set_node_inflow(&mut p, 0, 1.25).unwrap();
    for _ in 0..3 {
        p.step().unwrap();
        assert_eq!(node_result(&p, 0, lateral), Ok(1.25));
    }
}

#[test]
fn inflow_override_adds_to_existing_baseline() {
    let mut p = sample_network(FlowUnits::Cfs);
    p.start().unwrap();
    set_node_inflow(&mut p, 1, 2.0).unwrap();
    p.step().unwrap();
    let lateral = node_result(&p, 1, NodeResult::LateralInflow.code()).unwrap();
    assert_eq!(lateral, 2.5);
}

// ── Metadata ─────────────────────────────────────────────────────────

#[test]
fn window_metadata_and_clock() {
    let mut p = sample_network(FlowUnits::Gpm);
    let end = simulation_datetime(&p, 1).unwrap();
    assert_eq!(
        sluice_core::time::format_datetime(end),
        "JAN-01-2000 06:00:00"
    );
    assert_eq!(simulation_unit(&p, 0), Ok(0));
    assert_eq!(simulation_unit(&p, 1), Ok(1));
    assert_eq!(analysis_setting(&p, 0), Ok(false));
    assert_eq!(
        simulation_param(&p, SimulationParam::MinSurfArea.code()),
        Ok(12.566)
    );

    p.start().unwrap();
    while p.step().unwrap() > 0.0 {}
    assert_eq!(current_datetime(&p), Ok(end));
    p.end().unwrap();
    let flow_error = simulation_param(&p, SimulationParam::FlowError.code()).unwrap();
    assert_eq!(flow_error, p.continuity().flow);
}
