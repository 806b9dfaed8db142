pub mod jesd_transport_parameters;
