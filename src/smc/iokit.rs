//! Native session talking to the `AppleSMC` IOKit user client.

use crate::error::{Result, SmcError};
use crate::smc::{RawValue, SensorKey, SmcSession, TypeTag};
use std::ffi::{c_char, c_void};
use tracing::{debug, info};

type KernReturn = i32;
type MachPort = u32;
type IoObject = MachPort;
type IoConnect = MachPort;

const KERN_SUCCESS: KernReturn = 0;
const MACH_PORT_NULL: MachPort = 0;

/// User client method that handles every SMC command.
const KERNEL_INDEX_SMC: u32 = 2;
const SMC_CMD_READ_BYTES: u8 = 5;
const SMC_CMD_READ_KEYINFO: u8 = 9;

/// Size of the fixed data buffer in every SMC reply.
const SMC_BYTES_LEN: usize = 32;

#[link(name = "IOKit", kind = "framework")]
extern "C" {
    fn IOServiceMatching(name: *const c_char) -> *mut c_void;
    fn IOServiceGetMatchingService(main_port: MachPort, matching: *mut c_void) -> IoObject;
    fn IOServiceOpen(
        service: IoObject,
        owning_task: MachPort,
        connect_type: u32,
        connect: *mut IoConnect,
    ) -> KernReturn;
    fn IOServiceClose(connect: IoConnect) -> KernReturn;
    fn IOObjectRelease(object: IoObject) -> KernReturn;
    fn IOConnectCallStructMethod(
        connection: IoConnect,
        selector: u32,
        input: *const c_void,
        input_size: usize,
        output: *mut c_void,
        output_size: *mut usize,
    ) -> KernReturn;
}

extern "C" {
    static mach_task_self_: MachPort;
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct KeyDataVersion {
    major: u8,
    minor: u8,
    build: u8,
    reserved: u8,
    release: u16,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct KeyDataLimits {
    version: u16,
    length: u16,
    cpu_limit: u32,
    gpu_limit: u32,
    mem_limit: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct KeyInfo {
    data_size: u32,
    data_type: u32,
    data_attributes: u8,
}

/// Request/response block exchanged with the user client. Layout must match
/// the kernel's `SMCKeyData_t` exactly (80 bytes).
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct KeyData {
    key: u32,
    version: KeyDataVersion,
    limits: KeyDataLimits,
    key_info: KeyInfo,
    result: u8,
    status: u8,
    data8: u8,
    data32: u32,
    bytes: [u8; SMC_BYTES_LEN],
}

/// An open `AppleSMC` connection.
pub struct IokitSession {
    connection: Option<IoConnect>,
}

impl IokitSession {
    /// Open the `AppleSMC` service.
    pub fn open() -> Result<Self> {
        // SAFETY: the matching dictionary is consumed by IOServiceGetMatchingService,
        // and the service object is released once the connection is open.
        unsafe {
            let matching = IOServiceMatching(c"AppleSMC".as_ptr());
            if matching.is_null() {
                return Err(SmcError::connection_error("IOServiceMatching(AppleSMC) failed"));
            }
            let service = IOServiceGetMatchingService(MACH_PORT_NULL, matching);
            if service == MACH_PORT_NULL {
                return Err(SmcError::connection_error("AppleSMC service not found"));
            }

            let mut connection: IoConnect = MACH_PORT_NULL;
            let kr = IOServiceOpen(service, mach_task_self_, 0, &mut connection);
            IOObjectRelease(service);
            if kr != KERN_SUCCESS {
                return Err(SmcError::connection_error(format!(
                    "IOServiceOpen(AppleSMC) failed: 0x{:08x}",
                    kr
                )));
            }

            info!("AppleSMC connection opened");
            Ok(Self {
                connection: Some(connection),
            })
        }
    }

    fn call(&self, key: SensorKey, input: &KeyData) -> Result<KeyData> {
        let connection = self
            .connection
            .ok_or_else(|| SmcError::key_read_error(key.to_string(), "session is closed"))?;

        let mut output = KeyData::default();
        let mut output_size = std::mem::size_of::<KeyData>();
        // SAFETY: both buffers are valid repr(C) KeyData values of the size passed.
        let kr = unsafe {
            IOConnectCallStructMethod(
                connection,
                KERNEL_INDEX_SMC,
                input as *const KeyData as *const c_void,
                std::mem::size_of::<KeyData>(),
                &mut output as *mut KeyData as *mut c_void,
                &mut output_size,
            )
        };
        if kr != KERN_SUCCESS {
            return Err(SmcError::key_read_error(
                key.to_string(),
                format!("IOConnectCallStructMethod failed: 0x{:08x}", kr),
            ));
        }
        if output.result != 0 {
            return Err(SmcError::key_read_error(
                key.to_string(),
                format!("SMC result code {}", output.result),
            ));
        }
        Ok(output)
    }
}

impl SmcSession for IokitSession {
    fn backend_name(&self) -> &'static str {
        "iokit"
    }

    fn read(&mut self, key: SensorKey) -> Result<RawValue> {
        let info_request = KeyData {
            key: key.to_code(),
            data8: SMC_CMD_READ_KEYINFO,
            ..KeyData::default()
        };
        let info = self.call(key, &info_request)?.key_info;

        let read_request = KeyData {
            key: key.to_code(),
            key_info: KeyInfo {
                data_size: info.data_size,
                ..KeyInfo::default()
            },
            data8: SMC_CMD_READ_BYTES,
            ..KeyData::default()
        };
        let reply = self.call(key, &read_request)?;

        let size = (info.data_size as usize).min(SMC_BYTES_LEN);
        Ok(RawValue::with_size(
            TypeTag::from_code(info.data_type),
            size,
            reply.bytes.to_vec(),
        ))
    }

    fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            // SAFETY: the connection came from IOServiceOpen and is closed once.
            unsafe {
                IOServiceClose(connection);
            }
            debug!("AppleSMC connection closed");
        }
    }
}

impl Drop for IokitSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_data_layout() {
        assert_eq!(std::mem::size_of::<KeyData>(), 80);
        assert_eq!(std::mem::size_of::<KeyInfo>(), 12);
    }
}
